use std::collections::HashMap;
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};

/// ## Module source provider
///
/// Resolves the bare name given to `import` and returns the display path of
/// the module together with its source text.

pub trait Loader {
    fn load(&mut self, name: &str) -> Result<(String, String)>;
}

/// Loads modules from one standard library directory.
#[derive(Debug, Clone)]
pub struct DirLoader {
    dir: PathBuf,
}

impl DirLoader {
    pub fn new<P: Into<PathBuf>>(dir: P) -> DirLoader {
        DirLoader { dir: dir.into() }
    }

    /// `$TAPE_STD` when set, else the `std` directory shipped with the crate.
    pub fn from_env() -> DirLoader {
        match std::env::var_os("TAPE_STD") {
            Some(dir) => DirLoader::new(dir),
            None => DirLoader::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("std")),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Loader for DirLoader {
    fn load(&mut self, name: &str) -> Result<(String, String)> {
        if !self.dir.is_dir() {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("{} isn't a directory", self.dir.display()),
            ));
        }
        let exact = self.dir.join(name);
        let path = if exact.is_file() {
            exact
        } else {
            self.dir.join(format!("{}.tape", name))
        };
        let text = std::fs::read_to_string(&path)?;
        Ok((path.display().to_string(), text))
    }
}

/// In-memory modules, keyed by import name.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    modules: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> MemoryLoader {
        MemoryLoader::default()
    }

    pub fn with<N: Into<String>, T: Into<String>>(mut self, name: N, text: T) -> MemoryLoader {
        self.insert(name, text);
        self
    }

    pub fn insert<N: Into<String>, T: Into<String>>(&mut self, name: N, text: T) {
        self.modules.insert(name.into(), text.into());
    }
}

impl Loader for MemoryLoader {
    fn load(&mut self, name: &str) -> Result<(String, String)> {
        match self.modules.get(name) {
            Some(text) => Ok((name.to_string(), text.clone())),
            None => Err(Error::new(
                ErrorKind::NotFound,
                format!("no module named {}", name),
            )),
        }
    }
}
