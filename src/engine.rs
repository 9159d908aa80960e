use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, debug_span};

use crate::{
    ast::{build_tree, Node},
    catalog::UtilityCatalog,
    errors::{SourceContext, TaillessError},
    render::{prune, render},
    resolve::{resolve_mixins, resolve_variables},
    selectors::expand_selectors,
    syntax::{tokenize, Token},
};

// ============================================================================
// COMPILER PIPELINE
// ============================================================================

/// The full compilation pipeline, exposed stage by stage.
///
/// Stages run strictly in order over one in-memory tree and the first error
/// aborts the run. A `Compiler` holds no per-run state, so one instance can
/// compile any number of sources, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'c> {
    pub catalog: &'c UtilityCatalog,
}

impl Default for Compiler<'static> {
    fn default() -> Self {
        Self {
            catalog: UtilityCatalog::builtin(),
        }
    }
}

impl<'c> Compiler<'c> {
    // ============================================================================
    // STAGES
    // ============================================================================

    /// Normalizes, classifies and validates the source.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, TaillessError> {
        tokenize(source)
    }

    /// Builds the unresolved tree.
    pub fn parse(&self, source: &str) -> Result<Node, TaillessError> {
        let tokens = self.tokenize(source)?;
        let tree = build_tree(&tokens);
        debug!(nodes = tree.count(), "built tree");
        Ok(tree)
    }

    /// Resolves mixins then variables, in place.
    pub fn resolve(&self, tree: &mut Node) -> Result<(), TaillessError> {
        resolve_mixins(tree, self.catalog)?;
        resolve_variables(tree)?;
        debug!(nodes = tree.count(), "resolved tree");
        Ok(())
    }

    /// Expands selectors, prunes empty blocks and renders CSS.
    pub fn emit(&self, tree: &mut Node) -> String {
        expand_selectors(tree);
        prune(tree);
        let css = render(tree);
        debug!(bytes = css.len(), "rendered css");
        css
    }

    pub fn compile(&self, source: &str) -> Result<String, TaillessError> {
        let mut tree = self.parse(source)?;
        self.resolve(&mut tree)?;
        Ok(self.emit(&mut tree))
    }

    /// Like [`Compiler::compile`], with the source attached to any error.
    pub fn compile_named(&self, name: &str, source: &str) -> Result<String, TaillessError> {
        let _span = debug_span!("compile", file = name).entered();
        self.compile(source)
            .map_err(|error| error.with_source(SourceContext::from_file(name, source)))
    }

    /// Compiles `src` to `dest`. Output is written to a temporary file beside
    /// `dest` and only moved into place once it is complete.
    pub fn compile_file(&self, src: &Path, dest: &Path) -> Result<(), TaillessError> {
        let source = fs::read_to_string(src).map_err(|e| TaillessError::read_failed(src, &e))?;
        let css = self.compile_named(&src.display().to_string(), &source)?;
        write_atomically(dest, &css)?;
        debug!(src = %src.display(), dest = %dest.display(), "wrote stylesheet");
        Ok(())
    }
}

fn write_atomically(dest: &Path, contents: &str) -> Result<(), TaillessError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let fail = |e: std::io::Error| TaillessError::write_failed(dest, &e);

    fs::create_dir_all(&dir).map_err(fail)?;
    let mut file = NamedTempFile::new_in(&dir).map_err(fail)?;
    file.write_all(contents.as_bytes()).map_err(fail)?;
    file.persist(dest).map_err(|e| fail(e.error))?;
    Ok(())
}

// ============================================================================
// CONVENIENCE ENTRY POINTS
// ============================================================================

/// Compiles source text with the built-in utility catalog.
pub fn compile(source: &str) -> Result<String, TaillessError> {
    Compiler::default().compile(source)
}

pub fn compile_named(name: &str, source: &str) -> Result<String, TaillessError> {
    Compiler::default().compile_named(name, source)
}

pub fn compile_file(src: &Path, dest: &Path) -> Result<(), TaillessError> {
    Compiler::default().compile_file(src, dest)
}
