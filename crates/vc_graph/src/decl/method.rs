use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{TypeInfo, TypeLink, Typed};
use crate::object::Object;

// -----------------------------------------------------------------------------
// MethodSig

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// An associated function, the value is passed as a parameter if at all.
    Static,
    /// A method taking `&self`.
    Instance,
}

/// The shape of a declared method: receiver, parameters and return type.
///
/// The typed constructors of [`SurrogateTo`], [`SurrogateFrom`],
/// [`SurrogateIf`] and [`FactoryDecl`] fill it in, manual registrations set
/// it with `with_signature` and have it validated by the schema builder.
#[derive(Clone)]
pub struct MethodSig {
    pub receiver: Receiver,
    pub params: Vec<TypeLink>,
    pub returns: Option<TypeLink>,
}

impl MethodSig {
    pub const fn new(receiver: Receiver) -> Self {
        Self {
            receiver,
            params: Vec::new(),
            returns: None,
        }
    }

    pub fn param<T: Typed>(mut self) -> Self {
        self.params.push(T::type_info);
        self
    }

    pub fn returns<T: Typed>(mut self) -> Self {
        self.returns = Some(T::type_info);
        self
    }

    #[inline]
    pub fn return_info(&self) -> Option<&'static TypeInfo> {
        self.returns.map(|link| link())
    }

    #[inline]
    pub fn param_info(&self, index: usize) -> Option<&'static TypeInfo> {
        self.params.get(index).map(|link| link())
    }
}

impl fmt::Debug for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<_> = self.params.iter().map(|link| link().type_path()).collect();
        f.debug_struct("MethodSig")
            .field("receiver", &self.receiver)
            .field("params", &params)
            .field("returns", &self.return_info().map(TypeInfo::type_path))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Erased callables

pub type ToSurrogateFn = Arc<dyn Fn(&dyn Object) -> Option<Box<dyn Object>> + Send + Sync>;
pub type FromSurrogateFn =
    Arc<dyn Fn(Box<dyn Object>) -> Result<Box<dyn Object>, Box<dyn Object>> + Send + Sync>;
pub type SurrogateIfFn = Arc<dyn Fn(&dyn Object) -> Option<bool> + Send + Sync>;
pub type FactoryFn = Arc<dyn Fn() -> Box<dyn Object> + Send + Sync>;

/// Hooks running on the source of a clone or the destination of a merge.
pub type SerializationHook = fn(&dyn Object);

/// Hooks running on freshly constructed or merged-into values.
pub type DeserializationHook = fn(&mut dyn Object);

/// `(collection, index, element) -> should the element be transferred`.
pub type ItemIfFn = fn(&dyn Object, usize, &dyn Object) -> bool;

// -----------------------------------------------------------------------------
// Named declarations

/// A named method declaration.
#[derive(Clone)]
pub struct MethodDecl<F> {
    pub name: &'static str,
    pub sig: MethodSig,
    pub func: F,
}

impl<F> MethodDecl<F> {
    /// A declaration with an explicit signature, checked by the schema builder.
    pub fn with_signature(name: &'static str, sig: MethodSig, func: F) -> Self {
        Self { name, sig, func }
    }
}

/// `fn(&self) -> Surrogate`.
pub type SurrogateTo = MethodDecl<ToSurrogateFn>;
/// `fn(Surrogate) -> Self`.
pub type SurrogateFrom = MethodDecl<FromSurrogateFn>;
/// `fn(&self) -> bool`, the surrogate is only used when it holds.
pub type SurrogateIf = MethodDecl<SurrogateIfFn>;
/// `fn() -> Self`.
pub type FactoryDecl = MethodDecl<FactoryFn>;

impl SurrogateTo {
    pub fn new<T: Object, S: Object + Typed>(name: &'static str, to: fn(&T) -> S) -> Self {
        let sig = MethodSig::new(Receiver::Instance).returns::<S>();
        let func: ToSurrogateFn = Arc::new(move |obj: &dyn Object| {
            let owner = obj.downcast_ref::<T>()?;
            Some(Box::new(to(owner)) as Box<dyn Object>)
        });
        Self::with_signature(name, sig, func)
    }
}

impl SurrogateFrom {
    pub fn new<S: Object + Typed, T: Object + Typed>(name: &'static str, from: fn(S) -> T) -> Self {
        let sig = MethodSig::new(Receiver::Static).param::<S>().returns::<T>();
        let func: FromSurrogateFn = Arc::new(move |surrogate: Box<dyn Object>| {
            let surrogate = surrogate.take::<S>()?;
            Ok(Box::new(from(surrogate)) as Box<dyn Object>)
        });
        Self::with_signature(name, sig, func)
    }
}

impl SurrogateIf {
    pub fn new<T: Object>(name: &'static str, test: fn(&T) -> bool) -> Self {
        let sig = MethodSig::new(Receiver::Instance).returns::<bool>();
        let func: SurrogateIfFn =
            Arc::new(move |obj: &dyn Object| obj.downcast_ref::<T>().map(test));
        Self::with_signature(name, sig, func)
    }
}

impl FactoryDecl {
    pub fn new<T: Object + Typed>(name: &'static str, make: fn() -> T) -> Self {
        let sig = MethodSig::new(Receiver::Static).returns::<T>();
        let func: FactoryFn = Arc::new(move || Box::new(make()) as Box<dyn Object>);
        Self::with_signature(name, sig, func)
    }
}

/// A named hook or element predicate.
#[derive(Clone, Copy)]
pub struct Named<F> {
    pub name: &'static str,
    pub func: F,
}

impl<F> Named<F> {
    #[inline]
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}
