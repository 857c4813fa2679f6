use crate::error;
use crate::lang::{lex, Error, FileId, Loader, Location, Sources, Token};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub struct Config {
    /// Slots in the simulated heap.
    pub heap_capacity: usize,
    /// Splice imported modules into the importing tape at association time.
    /// When false an `Import` instruction is emitted and resolved by the
    /// checker and the runtime.
    pub splice_imports: bool,
    /// Instructions per `Runtime::execute` slice.
    pub cycles: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            heap_capacity: 300_000,
            splice_imports: true,
            cycles: 5000,
        }
    }
}

/// ## Toolchain context
///
/// Everything the stages share: the file table, configuration, the module
/// loader and the chain of modules currently being imported.

pub struct Context {
    pub sources: Sources,
    pub config: Config,
    loader: Box<dyn Loader>,
    importing: Vec<String>,
}

impl Context {
    pub fn new<L: Loader + 'static>(config: Config, loader: L) -> Context {
        Context {
            sources: Sources::new(),
            config,
            loader: Box::new(loader),
            importing: vec![],
        }
    }

    pub fn add_source<N: Into<String>, T: Into<String>>(&mut self, name: N, text: T) -> FileId {
        self.sources.add(name, text)
    }

    /// Resolve, load and lex one module. Must be paired with `close_module`.
    pub(crate) fn open_module(&mut self, name: &str, loc: &Location) -> Result<Vec<Token>> {
        if name.starts_with('.') || name.contains('/') || name.contains('\\') {
            return Err(error!(ImportNotImplemented, ..loc;
                format!("relative imports are not implemented: {}", name)));
        }
        if self.importing.iter().any(|n| n == name) {
            return Err(error!(ImportCycle, ..loc; format!(
                "{} -> {}",
                self.importing.join(" -> "),
                name
            )));
        }
        let (path, text) = self
            .loader
            .load(name)
            .map_err(|e| error!(MissingImport, ..loc; format!("{}: {}", name, e)))?;
        let file = match self.sources.find(&path) {
            Some(file) => file,
            None => self.sources.add(path.as_str(), text),
        };
        debug!(module = name, path = path.as_str(), "import resolved");
        let tokens = lex(&self.sources, file)?;
        self.importing.push(name.to_string());
        Ok(tokens)
    }

    pub(crate) fn close_module(&mut self) {
        self.importing.pop();
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("files", &self.sources.len())
            .field("config", &self.config)
            .field("importing", &self.importing)
            .finish()
    }
}
