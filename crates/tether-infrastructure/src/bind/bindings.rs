//! Binding accumulation

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use tether_domain::constants::SCOPE_AUTO;
use tether_domain::error::{Error, Result};
use tether_domain::lang::builtin::{INITIALISER, INITIALISER_SORTER};
use tether_domain::lang::{Class, Method, Type};
use tether_domain::object::Object;
use tether_domain::ports::{Initialiser, InitialiserSorter, initialiser_object, sorter_object};
use tether_domain::value_objects::{
    ConstructorStrategy, DeclarationType, Hint, Instance, Name, Source,
};
use tracing::{debug, trace};

use super::binding::Binding;
use super::module::Module;

/// Collects the bindings of all modules before disambiguation
pub struct Bindings {
    bindings: Vec<Binding>,
    declared: HashSet<TypeId>,
    strategy: ConstructorStrategy,
}

impl Bindings {
    pub fn new() -> Self {
        Self::with_strategy(ConstructorStrategy::default())
    }

    /// Constructor bindings added through [`Bindings::construct`] use `strategy`
    pub fn with_strategy(strategy: ConstructorStrategy) -> Self {
        Self {
            bindings: Vec::new(),
            declared: HashSet::new(),
            strategy,
        }
    }

    pub fn strategy(&self) -> ConstructorStrategy {
        self.strategy
    }

    /// Adds a complete binding; its source is numbered by arrival
    pub fn add(&mut self, binding: Binding) -> Result<()> {
        if !binding.is_complete() {
            return Err(Error::adding_incomplete(&binding));
        }
        let numbered = Binding {
            source: binding.source.numbered(self.bindings.len()),
            ..binding
        };
        trace!(binding = %numbered, "Binding added");
        self.bindings.push(numbered);
        Ok(())
    }

    pub fn add_constant(&mut self, instance: Instance, value: Object, source: Source) -> Result<()> {
        self.add(Binding::constant(instance, value, source))
    }

    /// Runs `initialiser` on every constructed instance assignable to
    /// `initialised`
    ///
    /// Any number of initialisers may be added for the same type.
    pub fn add_initialiser(
        &mut self,
        initialised: Type,
        initialiser: Arc<dyn Initialiser>,
        source: Source,
    ) -> Result<()> {
        let ty = Type::of(&INITIALISER, vec![initialised])?;
        self.add_constant(
            Instance::new(Name::any(), ty),
            initialiser_object(initialiser),
            source.typed(DeclarationType::Multi),
        )
    }

    /// Orders initialisers applying to the same instance
    pub fn add_initialiser_sorter(
        &mut self,
        sorter: Arc<dyn InitialiserSorter>,
        source: Source,
    ) -> Result<()> {
        self.add_constant(Instance::of_class(&INITIALISER_SORTER), sorter_object(sorter), source)
    }

    pub fn add_reference(&mut self, instance: Instance, to: Instance, source: Source) -> Result<()> {
        self.add(Binding::reference(instance, to, source)?)
    }

    pub fn add_elements(&mut self, instance: Instance, elements: Vec<Hint>, source: Source) -> Result<()> {
        self.add(Binding::elements(instance, elements, Name::named(SCOPE_AUTO), source)?)
    }

    /// Binds `instance` to a constructor of `class` in `scope`
    pub fn construct(
        &mut self,
        instance: Instance,
        class: &Class,
        hints: &[Hint],
        scope: Name,
        source: Source,
    ) -> Result<()> {
        let binding = Binding::constructor(instance, class, self.strategy, hints, scope, source)?;
        self.add(binding)
    }

    pub fn add_method(
        &mut self,
        instance: Instance,
        method: Method,
        hints: &[Hint],
        scope: Name,
        source: Source,
    ) -> Result<()> {
        self.add(Binding::method(instance, method, hints, scope, source)?)
    }

    pub fn require(&mut self, ty: Type, source: &Source) -> Result<()> {
        self.add(Binding::required(ty, source))
    }

    /// Lets each module declare its bindings
    pub fn declare_from(&mut self, modules: &[Arc<dyn Module>]) -> Result<()> {
        for module in modules {
            if !self.declared.insert(module.module_type()) && !module.is_multimodal() {
                debug!(module = module.name(), "Module already declared");
                continue;
            }
            let before = self.bindings.len();
            module.declare(self)?;
            debug!(
                module = module.name(),
                bindings = self.bindings.len() - before,
                "Module declared"
            );
        }
        Ok(())
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new()
    }
}
