/// ## Static value types
///
/// What the type checker tracks in place of values. `Any` matches
/// everything in both directions.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Number,
    String,
    Pointer,
    Any,
}

impl Type {
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "number" | "num" | "n" => Some(Type::Number),
            "string" | "str" | "s" => Some(Type::String),
            "ptr" | "pointer" | "p" => Some(Type::Pointer),
            "any" | "a" => Some(Type::Any),
            _ => None,
        }
    }

    pub fn accepts(self, other: Type) -> bool {
        self == Type::Any || other == Type::Any || self == other
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Type::*;
        match self {
            Number => write!(f, "number"),
            String => write!(f, "string"),
            Pointer => write!(f, "ptr"),
            Any => write!(f, "any"),
        }
    }
}
