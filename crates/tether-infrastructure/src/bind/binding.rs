//! Bindings
//!
//! A [`Binding`] is the declarative form of a resource: what is bound
//! ([`Locator`]), how it is supplied, in which scope and by whom.

use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::sync::Arc;

use tether_domain::constants::{SCOPE_CONTAINER, SCOPE_REFERENCE};
use tether_domain::error::{Error, Result};
use tether_domain::lang::{Class, Method, Type};
use tether_domain::object::Object;
use tether_domain::ports::Supplier;
use tether_domain::value_objects::{
    ConstructorStrategy, DeclarationType, Hint, Instance, Locator, Name, Source,
};

use super::supply::{
    ConstantSupplier, ConstructorSupplier, ElementsSupplier, MethodSupplier, ReferenceSupplier,
    RequiredSupplier,
};

/// How a binding supplies its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BindingType {
    /// Not yet known; the binding is incomplete
    Value,
    /// A constant or otherwise predefined supplier
    Predefined,
    /// Delegates to another instance
    Reference,
    /// Invokes a declared constructor
    Constructor,
    /// Invokes a declared factory method
    Method,
    /// Assembles an array from element hints
    Elements,
}

/// The declarative description of a resource
#[derive(Clone)]
pub struct Binding {
    pub locator: Locator,
    pub binding_type: BindingType,
    pub supplier: Option<Arc<dyn Supplier>>,
    pub scope: Name,
    pub source: Source,
}

impl Binding {
    pub fn new(
        locator: Locator,
        binding_type: BindingType,
        supplier: Option<Arc<dyn Supplier>>,
        scope: Name,
        source: Source,
    ) -> Self {
        Self {
            locator,
            binding_type,
            supplier,
            scope,
            source,
        }
    }

    /// An incomplete binding that still needs a supplier
    pub fn value(locator: Locator, scope: Name, source: Source) -> Self {
        Self::new(locator, BindingType::Value, None, scope, source)
    }

    /// A shared constant in the container scope
    pub fn constant(instance: Instance, value: Object, source: Source) -> Self {
        Self::new(
            Locator::untargeted(instance),
            BindingType::Predefined,
            Some(Arc::new(ConstantSupplier::new(value))),
            Name::named(SCOPE_CONTAINER),
            source,
        )
    }

    /// `instance` is served by whatever serves `to`
    pub fn reference(instance: Instance, to: Instance, source: Source) -> Result<Self> {
        if instance == to {
            return Err(Error::self_referential(&instance, &to));
        }
        if !to.ty.is_assignable_to(&instance.ty) {
            return Err(Error::class_cast(&to.ty, &instance.ty));
        }
        Ok(Self::new(
            Locator::untargeted(instance),
            BindingType::Reference,
            Some(Arc::new(ReferenceSupplier::new(to))),
            Name::named(SCOPE_REFERENCE),
            source,
        ))
    }

    /// An array assembled from `elements` in declaration order
    pub fn elements(instance: Instance, elements: Vec<Hint>, scope: Name, source: Source) -> Result<Self> {
        let element_type = instance.ty.element_type().ok_or_else(|| {
            Error::inconsistent(format!("Elements can only be bound to array types: {instance}"))
        })?;
        let elements = elements
            .iter()
            .map(|hint| hint.typed(&element_type))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(
            Locator::untargeted(instance),
            BindingType::Elements,
            Some(Arc::new(ElementsSupplier::new(elements))),
            scope,
            source,
        ))
    }

    /// Constructs `class` through the constructor `strategy` selects
    pub fn constructor(
        instance: Instance,
        class: &Class,
        strategy: ConstructorStrategy,
        hints: &[Hint],
        scope: Name,
        source: Source,
    ) -> Result<Self> {
        let constructed = Type::raw(class);
        if !constructed.is_assignable_to(&instance.ty) {
            return Err(Error::class_cast(&constructed, &instance.ty));
        }
        let constructor = strategy.select(class)?;
        let hints = Hint::match_types(constructor.parameters(), hints)?;
        Ok(Self::new(
            Locator::untargeted(instance),
            BindingType::Constructor,
            Some(Arc::new(ConstructorSupplier::new(
                constructed,
                constructor,
                hints,
            ))),
            scope,
            source,
        ))
    }

    /// Produces values by invoking `method`
    pub fn method(
        instance: Instance,
        method: Method,
        hints: &[Hint],
        scope: Name,
        source: Source,
    ) -> Result<Self> {
        if !method.returns().is_assignable_to(&instance.ty) {
            return Err(Error::class_cast(method.returns(), &instance.ty));
        }
        let hints = Hint::match_types(method.parameters(), hints)?;
        Ok(Self::new(
            Locator::untargeted(instance),
            BindingType::Method,
            Some(Arc::new(MethodSupplier::new(method, hints))),
            scope,
            source,
        ))
    }

    /// Declares that some other binding must provide `ty`
    pub fn required(ty: Type, source: &Source) -> Self {
        Self::new(
            Locator::untargeted(Instance::default_instance_of(ty)),
            BindingType::Predefined,
            Some(Arc::new(RequiredSupplier)),
            Name::named(SCOPE_CONTAINER),
            source.typed(DeclarationType::Required),
        )
    }

    pub fn ty(&self) -> &Type {
        self.locator.ty()
    }

    pub fn declaration_type(&self) -> DeclarationType {
        self.source.declaration_type
    }

    pub fn is_complete(&self) -> bool {
        self.supplier.is_some()
    }

    /// Attaches the supplier
    ///
    /// Reference bindings always end up in the pass-through reference scope.
    pub fn complete(&self, binding_type: BindingType, supplier: Arc<dyn Supplier>) -> Result<Self> {
        if binding_type == BindingType::Value {
            return Err(Error::illegal_completion(self, binding_type));
        }
        let scope = if binding_type == BindingType::Reference {
            Name::named(SCOPE_REFERENCE)
        } else {
            self.scope.clone()
        };
        Ok(Self::new(
            self.locator.clone(),
            binding_type,
            Some(supplier),
            scope,
            self.source.clone(),
        ))
    }

    /// The same binding bound as one of its supertypes
    pub fn typed(&self, supertype: &Type) -> Result<Self> {
        let ty = self.ty().to_supertype(supertype)?;
        Ok(Self {
            locator: self.locator.typed(ty),
            ..self.clone()
        })
    }

    /// Both bindings are predefined constants sharing the same value
    pub fn is_identical_constant(&self, other: &Binding) -> bool {
        let constant = |b: &Binding| {
            b.supplier
                .as_ref()
                .and_then(|s| s.as_constant().cloned())
        };
        self.binding_type == BindingType::Predefined
            && other.binding_type == BindingType::Predefined
            && match (constant(self), constant(other)) {
                (Some(a), Some(b)) => Arc::ptr_eq(&a, &b),
                _ => false,
            }
    }
}

impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Binding {}

impl PartialOrd for Binding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Binding {
    /// Raw type name, then instance, target and source (each more qualified
    /// first), then scope and binding type. Equal locators end up adjacent.
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.locator, &other.locator);
        a.ty()
            .raw_class()
            .name()
            .cmp(b.ty().raw_class().name())
            .then_with(|| {
                a.instance
                    .qualification_rank()
                    .cmp(&b.instance.qualification_rank())
            })
            .then_with(|| a.instance.cmp(&b.instance))
            .then_with(|| a.target.qualification_rank().cmp(&b.target.qualification_rank()))
            .then_with(|| a.target.cmp(&b.target))
            .then_with(|| {
                Reverse(self.source.declaration_type).cmp(&Reverse(other.source.declaration_type))
            })
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.scope.cmp(&other.scope))
            .then_with(|| self.binding_type.cmp(&other.binding_type))
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} [{}] {}",
            self.locator, self.binding_type, self.scope, self.source
        )
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binding({self})")
    }
}
