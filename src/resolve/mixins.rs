//! Mixin resolution.
//!
//! Every `MixinCall` is replaced by the declarations it names. A call is
//! looked up in the utility catalog first and in the lexical mixin scope
//! second, so a built-in utility always wins over a user mixin with the same
//! name.
//!
//! Mixins are lexically scoped. Every definition block is resolved once, in
//! place, against the scope it is defined in, before the calls of that block
//! are expanded. Call sites then receive deep copies of the resolved body, so
//! a mixin defined at a call site never changes what a spliced body calls.
//!
//! Self-nesting is detected with a stack of definition ids: a definition is
//! "active" while its own block is being resolved in place and while one of
//! its copies is being spliced. Calling an active definition is an error.

use tracing::trace;

use crate::ast::{Node, NodeKind};
use crate::catalog::UtilityCatalog;
use crate::errors::{ErrorReporting, TaillessError};
use crate::scope::Scope;

/// A user-defined mixin and the body call sites copy.
#[derive(Debug)]
struct Definition {
    id: usize,
    body: Vec<Node>,
    /// False until the definition block has been resolved in place.
    resolved: bool,
}

type MixinScope<'p> = Scope<'p, Definition>;

pub fn resolve_mixins(root: &mut Node, catalog: &UtilityCatalog) -> Result<(), TaillessError> {
    let mut resolver = MixinResolver::new(catalog);
    resolver.resolve_node(root, &Scope::root())?;
    trace!(definitions = resolver.next_id, "resolved mixins");
    Ok(())
}

struct MixinResolver<'c> {
    catalog: &'c UtilityCatalog,
    active: Vec<usize>,
    next_id: usize,
}

impl<'c> MixinResolver<'c> {
    fn new(catalog: &'c UtilityCatalog) -> Self {
        Self {
            catalog,
            active: Vec::new(),
            next_id: 0,
        }
    }

    fn resolve_node(&mut self, node: &mut Node, parent: &MixinScope<'_>) -> Result<(), TaillessError> {
        let mut scope = Scope::child(parent);
        let mut definitions = Vec::new();
        for (index, child) in node.children.iter().enumerate() {
            if let Some(name) = child.mixin_signature() {
                let id = self.next_id;
                self.next_id += 1;
                scope.define(
                    name,
                    Definition {
                        id,
                        body: child.children.clone(),
                        resolved: false,
                    },
                );
                definitions.push((index, id, name.to_string()));
            }
        }

        // Definitions first, so every call below copies a resolved body.
        for (index, id, name) in definitions.iter() {
            let child = &mut node.children[*index];
            self.active.push(*id);
            let result = self.resolve_node(child, &scope);
            self.active.pop();
            result?;
            scope.define(
                name.as_str(),
                Definition {
                    id: *id,
                    body: child.children.clone(),
                    resolved: true,
                },
            );
        }

        let children = std::mem::take(&mut node.children);
        let mut resolved = Vec::with_capacity(children.len());

        for (index, mut child) in children.into_iter().enumerate() {
            if matches!(child.kind, NodeKind::MixinCall { .. }) {
                resolved.extend(self.expand_call(&child, &scope)?);
                continue;
            }
            if !definitions.iter().any(|(at, ..)| *at == index) {
                self.resolve_node(&mut child, &scope)?;
            }
            resolved.push(child);
        }

        node.children = resolved;
        Ok(())
    }

    fn expand_call(&mut self, call: &Node, scope: &MixinScope<'_>) -> Result<Vec<Node>, TaillessError> {
        let name = call.mixin_call_name().unwrap_or_default();

        if let Some(declarations) = self.catalog.lookup(name) {
            trace!(line = call.line, name, "spliced utility");
            return Ok(declarations
                .iter()
                .map(|text| Node::declaration(text.clone(), call.line))
                .collect());
        }

        let Some((definition, owner)) = scope.lookup_scoped(name) else {
            return Err(call.mixin_not_found(name));
        };
        if self.active.contains(&definition.id) {
            return Err(call.invalid_parent_mixin(name));
        }

        trace!(line = call.line, name, resolved = definition.resolved, "spliced mixin");
        if definition.resolved {
            return Ok(definition.body.iter().map(Node::deep_copy).collect());
        }

        self.active.push(definition.id);
        let spliced = self.splice(&definition.body, owner);
        self.active.pop();
        spliced
    }

    /// Copies a body that has not been resolved yet, resolving it against the
    /// scope the mixin was defined in. Only a call from one definition to a
    /// later sibling definition gets here.
    fn splice(&mut self, body: &[Node], owner: &MixinScope<'_>) -> Result<Vec<Node>, TaillessError> {
        let mut spliced = Vec::with_capacity(body.len());
        for node in body {
            let mut copy = node.deep_copy();
            if matches!(copy.kind, NodeKind::MixinCall { .. }) {
                spliced.extend(self.expand_call(&copy, owner)?);
            } else {
                self.resolve_node(&mut copy, owner)?;
                spliced.push(copy);
            }
        }
        Ok(spliced)
    }
}
