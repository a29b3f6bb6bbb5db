// feature_model/registry.rs
//
// FeatureRegistry: a standalone FeatureModel with declaration methods. Used
// by tools and tests that do not run the full resolver.

use fz_identity::{FeatureId, Interner, Span, Symbol};

use super::{FeatureModel, GenericParam, Inherit, OrderKey};
use crate::type_arena::{GenericId, TypeArena, TypeId, TypeIdVec};

const UNIVERSE_NAME: &str = "universe";
const THIS_TYPE_NAME: &str = "THIS_TYPE";

#[derive(Debug, Clone)]
struct FeatureDef {
    name: Symbol,
    qualified_name: String,
    outer: Option<FeatureId>,
    is_ref: bool,
    generics: Vec<GenericParam>,
    generic_names: Vec<Symbol>,
    inherits: Vec<Inherit>,
    summands: Option<TypeIdVec>,
    type_feature: Option<FeatureId>,
    /// Set for type features: the feature they were created for
    origin: Option<FeatureId>,
}

#[derive(Debug, Clone)]
pub struct FeatureRegistry {
    interner: Interner,
    features: Vec<FeatureDef>,
    universe: FeatureId,
    type_root: Option<FeatureId>,
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureRegistry {
    /// Create a registry containing only the universe.
    pub fn new() -> Self {
        let mut registry = Self {
            interner: Interner::new(),
            features: Vec::new(),
            universe: FeatureId::new(0),
            type_root: None,
        };
        let universe = registry.push(UNIVERSE_NAME, None, false, None);
        debug_assert_eq!(universe, registry.universe);
        registry
    }

    pub fn universe(&self) -> FeatureId {
        self.universe
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Find a feature by qualified name
    pub fn lookup(&self, qualified_name: &str) -> Option<FeatureId> {
        self.features
            .iter()
            .position(|def| def.qualified_name == qualified_name)
            .map(|index| FeatureId::new(index as u32))
    }

    fn def(&self, f: FeatureId) -> &FeatureDef {
        &self.features[f.index() as usize]
    }

    fn def_mut(&mut self, f: FeatureId) -> &mut FeatureDef {
        &mut self.features[f.index() as usize]
    }

    fn push(
        &mut self,
        name: &str,
        outer: Option<FeatureId>,
        is_ref: bool,
        origin: Option<FeatureId>,
    ) -> FeatureId {
        let id = FeatureId::new(self.features.len() as u32);
        let qualified_name = match outer {
            Some(o) if o != self.universe => format!("{}.{}", self.def(o).qualified_name, name),
            _ => name.to_string(),
        };
        let name = self.interner.intern(name);
        self.features.push(FeatureDef {
            name,
            qualified_name,
            outer,
            is_ref,
            generics: Vec::new(),
            generic_names: Vec::new(),
            inherits: Vec::new(),
            summands: None,
            type_feature: None,
            origin,
        });
        id
    }

    /// Declare a value feature. `outer == None` declares it in the universe.
    pub fn declare(&mut self, name: &str, outer: Option<FeatureId>) -> FeatureId {
        let outer = outer.unwrap_or(self.universe);
        self.push(name, Some(outer), false, None)
    }

    /// Declare a feature whose instances are references.
    pub fn declare_ref(&mut self, name: &str, outer: Option<FeatureId>) -> FeatureId {
        let outer = outer.unwrap_or(self.universe);
        self.push(name, Some(outer), true, None)
    }

    /// Append a formal generic to `f`.
    pub fn add_generic(
        &mut self,
        f: FeatureId,
        name: &str,
        constraint: TypeId,
        is_open: bool,
        span: Span,
    ) -> GenericId {
        let name = self.interner.intern(name);
        let def = self.def_mut(f);
        debug_assert!(
            def.generics.last().is_none_or(|p| !p.is_open),
            "only the last formal generic may be open"
        );
        let id = GenericId::new(f, def.generics.len() as u32);
        def.generics.push(GenericParam {
            id,
            is_open,
            constraint,
            span,
        });
        def.generic_names.push(name);
        id
    }

    /// Record `f : ancestor[actuals]`.
    pub fn add_inherits(
        &mut self,
        f: FeatureId,
        ancestor: FeatureId,
        actual_generics: TypeIdVec,
        types: &mut TypeArena,
    ) {
        let outer = match self.outer(ancestor) {
            Some(o) if !self.is_universe(o) => Some(self.self_type(o, types)),
            _ => None,
        };
        let ty = types.constructed(
            ancestor,
            actual_generics.clone(),
            outer,
            self.is_this_ref(ancestor),
        );
        self.def_mut(f).inherits.push(Inherit {
            ancestor,
            actual_generics,
            ty,
        });
    }

    /// Make `f` a choice of the given summands (in terms of `f`'s formals).
    pub fn set_choice(&mut self, f: FeatureId, summands: TypeIdVec) {
        self.def_mut(f).summands = Some(summands);
    }

    pub fn set_type_root(&mut self, f: FeatureId) {
        self.type_root = Some(f);
    }

    /// Create the type feature for `f`. Its outer is the type feature of
    /// `f`'s outer, its first formal is `THIS_TYPE` constrained by `f`'s self
    /// type and the remaining formals mirror `f`'s.
    fn create_type_feature(&mut self, f: FeatureId, types: &mut TypeArena) -> FeatureId {
        let outer = match self.outer(f) {
            Some(o) if !self.is_universe(o) => self
                .type_feature_or_create(o, types)
                .unwrap_or(self.universe),
            _ => self.universe,
        };
        let name = format!("{}.type", self.name(f));
        let tf = self.push(&name, Some(outer), false, Some(f));

        let this_constraint = self.self_type(f, types);
        self.add_generic(tf, THIS_TYPE_NAME, this_constraint, false, Span::default());
        let formals = self.def(f).generics.clone();
        let names = self.def(f).generic_names.clone();
        for (param, name) in formals.iter().zip(names) {
            let name = self.interner.resolve(name).to_string();
            // slot 0 of the type feature is THIS_TYPE
            let constraint = types.shift_generics(param.constraint, f, tf, 1);
            self.add_generic(tf, &name, constraint, param.is_open, param.span);
        }
        if let Some(root) = self.type_root {
            self.add_inherits(tf, root, TypeIdVec::new(), types);
        }

        self.def_mut(f).type_feature = Some(tf);
        tracing::trace!(feature = %self.qualified_name(f), type_feature = tf.index(), "created type feature");
        tf
    }
}

impl FeatureModel for FeatureRegistry {
    fn name(&self, f: FeatureId) -> &str {
        self.interner.resolve(self.def(f).name)
    }

    fn qualified_name(&self, f: FeatureId) -> &str {
        &self.def(f).qualified_name
    }

    fn outer(&self, f: FeatureId) -> Option<FeatureId> {
        self.def(f).outer
    }

    fn is_this_ref(&self, f: FeatureId) -> bool {
        self.def(f).is_ref
    }

    fn formal_generics(&self, f: FeatureId) -> &[GenericParam] {
        &self.def(f).generics
    }

    fn generic_name(&self, g: GenericId) -> &str {
        self.def(g.feature)
            .generic_names
            .get(g.index as usize)
            .map_or("?", |&name| self.interner.resolve(name))
    }

    fn inherits(&self, f: FeatureId) -> &[Inherit] {
        &self.def(f).inherits
    }

    fn declared_summands(&self, f: FeatureId) -> Option<&[TypeId]> {
        self.def(f).summands.as_deref()
    }

    fn canonical_order_key(&self, f: FeatureId) -> OrderKey<'_> {
        OrderKey {
            qualified_name: &self.def(f).qualified_name,
            id: f,
        }
    }

    fn is_type_feature(&self, f: FeatureId) -> bool {
        self.def(f).origin.is_some()
    }

    fn type_feature(&self, f: FeatureId) -> Option<FeatureId> {
        self.def(f).type_feature
    }

    fn type_feature_or_create(&mut self, f: FeatureId, types: &mut TypeArena) -> Option<FeatureId> {
        if let Some(tf) = self.def(f).type_feature {
            return Some(tf);
        }
        if self.is_universe(f) || self.is_type_feature(f) {
            return None;
        }
        Some(self.create_type_feature(f, types))
    }

    fn type_feature_origin(&self, tf: FeatureId) -> Option<FeatureId> {
        self.def(tf).origin
    }

    fn type_root(&self) -> Option<FeatureId> {
        self.type_root
    }
}
