use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::decl::{FromSurrogateFn, MethodDecl, MethodSig, Receiver, SurrogateIfFn};
use crate::decl::{ToSurrogateFn, TypeDecl};
use crate::error::{CloneError, DispatchError, SchemaError, SchemaErrorKind, SurrogateChainError};
use crate::hash::HashMap;
use crate::info::TypeInfo;
use crate::object::Object;
use crate::options::Options;

// -----------------------------------------------------------------------------
// Surrogate

/// Conversions of a type to and from the type standing in for it.
///
/// At least one direction is present. Cloning through the surrogate needs
/// both, see [`Surrogate::is_complete`].
#[derive(Clone)]
pub struct Surrogate {
    info: &'static TypeInfo,
    to: Option<ToSurrogateFn>,
    from: Option<FromSurrogateFn>,
    condition: Option<SurrogateIfFn>,
}

impl Surrogate {
    /// The type standing in for the owner.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.to.is_some() && self.from.is_some()
    }

    /// Whether `obj` goes through the surrogate, `true` without a condition.
    pub fn applies(&self, obj: &dyn Object) -> bool {
        match &self.condition {
            Some(condition) => condition(obj).unwrap_or(false),
            None => true,
        }
    }

    /// Converts `obj` to its surrogate.
    pub fn to_surrogate(&self, obj: &dyn Object) -> Result<Box<dyn Object>, DispatchError> {
        let owner = obj.type_path();
        let to = self.to.as_ref().ok_or(DispatchError::IncompleteSurrogate(owner))?;
        to(obj).ok_or(DispatchError::TypeMismatch {
            expected: owner,
            found: obj.type_path(),
        })
    }

    /// Converts a surrogate back into its owner type.
    pub fn from_surrogate(
        &self,
        owner: &'static str,
        surrogate: Box<dyn Object>,
    ) -> Result<Box<dyn Object>, DispatchError> {
        let from = self.from.as_ref().ok_or(DispatchError::IncompleteSurrogate(owner))?;
        from(surrogate).map_err(|rejected| DispatchError::TypeMismatch {
            expected: self.info.type_path(),
            found: rejected.type_path(),
        })
    }
}

impl fmt::Debug for Surrogate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surrogate")
            .field("type", &self.info.type_path())
            .field("to", &self.to.is_some())
            .field("from", &self.from.is_some())
            .field("condition", &self.condition.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Role registry

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    struct Role: u8 {
        /// The type is converted to a surrogate.
        const SOURCE = 1;
        /// The type stands in for another one.
        const TARGET = 2;
    }
}

static ROLES: LazyLock<RwLock<HashMap<(TypeId, Options), Role>>> =
    LazyLock::new(|| RwLock::new(HashMap::default()));

/// Records `role` for `ty`, keeping the first role recorded.
fn record(
    owner: &'static TypeInfo,
    ty: &'static TypeInfo,
    role: Role,
    options: &Options,
) -> Result<(), SurrogateChainError> {
    let mut roles = ROLES.write().unwrap_or_else(PoisonError::into_inner);
    let current = *roles.entry((ty.type_id(), *options)).or_insert(role);
    if (current | role) == Role::all() {
        return Err(SurrogateChainError {
            owner: owner.type_path(),
            chained: ty.ty().name(),
        });
    }
    Ok(())
}

pub(crate) fn clear_roles() {
    ROLES.write().unwrap_or_else(PoisonError::into_inner).clear();
}

// -----------------------------------------------------------------------------
// Resolution

const SURROGATE_IF: &str = "SurrogateIf";
const TO_SURROGATE: &str = "ToSurrogate";
const FROM_SURROGATE: &str = "FromSurrogate";

fn single<'a, F>(
    kind: &'static str,
    decls: &'a [MethodDecl<F>],
) -> Result<Option<&'a MethodDecl<F>>, SchemaErrorKind> {
    match decls {
        [] => Ok(None),
        [one] => Ok(Some(one)),
        [first, second, ..] => Err(SchemaErrorKind::DuplicateMethod(
            kind,
            first.name.into(),
            second.name.into(),
        )),
    }
}

/// A static form takes `accepted` as its only parameter, an instance form
/// takes none.
fn check_accepts(
    kind: &'static str,
    name: &'static str,
    sig: &MethodSig,
    accepted: &'static TypeInfo,
) -> Result<(), SchemaErrorKind> {
    match sig.receiver {
        Receiver::Static => {
            let Some(param) = sig.param_info(0).filter(|_| sig.params.len() == 1) else {
                return Err(SchemaErrorKind::StaticArity(kind, name.into(), sig.params.len()));
            };
            if param.type_id() != accepted.type_id() {
                return Err(SchemaErrorKind::StaticParameter(
                    kind,
                    name.into(),
                    accepted.ty().name(),
                    param.ty().name(),
                ));
            }
            Ok(())
        }
        Receiver::Instance if sig.params.is_empty() => Ok(()),
        Receiver::Instance => Err(SchemaErrorKind::InstanceArity(
            kind,
            name.into(),
            sig.params.len(),
        )),
    }
}

fn return_name(sig: &MethodSig) -> &'static str {
    sig.return_info().map_or("void", |info| info.ty().name())
}

/// Validates the surrogate methods of `decl` and records the roles of the
/// owner and its surrogate type.
///
/// Returns `None` when neither conversion is declared.
pub(crate) fn resolve(
    owner: &'static TypeInfo,
    decl: &TypeDecl,
    options: &Options,
) -> Result<Option<Surrogate>, CloneError> {
    let fail = |kind| CloneError::from(SchemaError::new(owner.type_path(), kind));

    let test = single(SURROGATE_IF, &decl.surrogate_ifs).map_err(fail)?;
    let to = single(TO_SURROGATE, &decl.to_surrogates).map_err(fail)?;
    let from = single(FROM_SURROGATE, &decl.from_surrogates).map_err(fail)?;

    if let Some(test) = test {
        match test.sig.return_info() {
            Some(ret) if ret.ty().is::<bool>() => {}
            _ => {
                return Err(fail(SchemaErrorKind::SurrogateIfReturn(
                    test.name.into(),
                    return_name(&test.sig),
                )));
            }
        }
        check_accepts(SURROGATE_IF, test.name, &test.sig, owner).map_err(fail)?;
    }

    let mut surrogate_info = None;

    if let Some(to) = to {
        let Some(ret) = to.sig.return_info() else {
            return Err(fail(SchemaErrorKind::ToSurrogateVoid(to.name.into())));
        };
        if ret.type_id() == owner.type_id() {
            return Err(fail(SchemaErrorKind::ToSurrogateOwner(to.name.into())));
        }
        check_accepts(TO_SURROGATE, to.name, &to.sig, owner).map_err(fail)?;
        surrogate_info = Some(ret);
    }

    if let Some(from) = from {
        if from.sig.receiver != Receiver::Static {
            return Err(fail(SchemaErrorKind::FromSurrogateNotStatic(from.name.into())));
        }
        if from.sig.return_info().map(TypeInfo::type_id) != Some(owner.type_id()) {
            return Err(fail(SchemaErrorKind::FromSurrogateReturn(
                from.name.into(),
                owner.ty().name(),
                return_name(&from.sig),
            )));
        }
        let accepted = match surrogate_info {
            Some(info) => info,
            None => {
                let Some(param) = from.sig.param_info(0) else {
                    return Err(fail(SchemaErrorKind::StaticArity(
                        FROM_SURROGATE,
                        from.name.into(),
                        0,
                    )));
                };
                if param.type_id() == owner.type_id() {
                    return Err(fail(SchemaErrorKind::FromSurrogateOwner(from.name.into())));
                }
                param
            }
        };
        check_accepts(FROM_SURROGATE, from.name, &from.sig, accepted).map_err(fail)?;
        surrogate_info = Some(accepted);
    }

    let Some(info) = surrogate_info else {
        return Ok(None);
    };

    // A `FromSurrogate` alone does not make the accepted type a surrogate.
    if to.is_some() {
        record(owner, info, Role::TARGET, options)?;
    }
    record(owner, owner, Role::SOURCE, options)?;

    Ok(Some(Surrogate {
        info,
        to: to.map(|to| to.func.clone()),
        from: from.map(|from| from.func.clone()),
        condition: test.map(|test| test.func.clone()),
    }))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::sync::Arc;

    use super::*;
    use crate::decl::{SurrogateFrom, SurrogateIf, SurrogateTo};
    use crate::info::Typed;

    struct Celsius;
    struct Kelvin;

    #[test]
    fn to_surrogate_returns_value() {
        let sig = MethodSig::new(Receiver::Instance);
        let to = SurrogateTo::with_signature("to_raw", sig, Arc::new(|_: &dyn Object| -> Option<Box<dyn Object>> { None }));
        let decl = TypeDecl::new::<Celsius>().with_to_surrogate(to);
        let err = resolve(u64::type_info(), &decl, &Options::new()).unwrap_err();
        assert_eq!(err.to_string(), "In type 'u64': ToSurrogate 'to_raw' returns void");
    }

    #[test]
    fn duplicate_surrogate_if() {
        let decl = TypeDecl::new::<Kelvin>()
            .with_surrogate_if(SurrogateIf::new::<u16>("a", |_| true))
            .with_surrogate_if(SurrogateIf::new::<u16>("b", |_| false));
        let err = resolve(u16::type_info(), &decl, &Options::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In type 'u16': Duplicate SurrogateIf: 'a' and 'b'"
        );
    }

    #[test]
    fn from_surrogate_must_return_owner() {
        let decl = TypeDecl::new::<i8>().with_from_surrogate(SurrogateFrom::new::<u8, i16>(
            "from_u8",
            |v| v as i16,
        ));
        let err = resolve(i8::type_info(), &decl, &Options::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In type 'i8': FromSurrogate 'from_u8' must return 'i8', but returns 'i16'"
        );
    }

    #[test]
    fn only_condition_is_no_surrogate() {
        let decl = TypeDecl::new::<i32>().with_surrogate_if(SurrogateIf::new::<i32>("if", |_| true));
        assert!(resolve(i32::type_info(), &decl, &Options::new()).unwrap().is_none());
    }
}
