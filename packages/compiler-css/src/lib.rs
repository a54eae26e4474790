mod config;
mod error;

pub use config::{Config, DEFAULT_CONFIG_NAME};
pub use error::{CompileError, CompileResult};
pub use nestcss_evaluator::{EvalError, EvalOptions, Ruleset, UnknownFunctionPolicy};

use nestcss_evaluator::Env;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{info, instrument};

/// Compiles evaluated-ready stylesheet trees to CSS, resolving `@import`
/// against the trees registered with [`Compiler::add_import`].
#[derive(Debug, Default)]
pub struct Compiler {
    config: Config,
    imports: HashMap<String, Rc<Ruleset>>,
}

impl Compiler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            imports: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers the parsed tree served for `@import "path"`.
    pub fn add_import(&mut self, path: impl Into<String>, tree: Rc<Ruleset>) -> &mut Self {
        self.imports.insert(path.into(), tree);
        self
    }

    #[instrument(skip(self, root), fields(imports = self.imports.len()))]
    pub fn compile(&self, root: &Rc<Ruleset>) -> CompileResult<String> {
        info!("Starting CSS compilation");

        let mut env = Env::with_options(self.config.evaluation.clone())
            .with_importer(self.imports.clone());
        let css = root.to_css(Some(&mut env))?;

        info!(bytes = css.len(), "CSS compilation complete");
        Ok(css)
    }
}

/// Compile a stylesheet tree to CSS with default options
pub fn compile_to_css(root: &Rc<Ruleset>) -> CompileResult<String> {
    Compiler::default().compile(root)
}

/// Compile with explicit evaluation options
pub fn compile_to_css_with_options(
    root: &Rc<Ruleset>,
    options: EvalOptions,
) -> CompileResult<String> {
    Compiler::new(Config {
        evaluation: options,
    })
    .compile(root)
}
