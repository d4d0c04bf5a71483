use crate::info::TypeInfo;
use crate::options::Options;
use crate::schema::{TypeSchema, cache};

/// Whether values of `info` can be copied instead of cloned field by field.
///
/// | Kind | Copyable |
/// |---|---|
/// | scalar | always |
/// | `Option<T>` | if `T` is |
/// | record | per its schema |
/// | anything else | never |
///
/// A record is only copyable when declared as a value, every item is copyable
/// and it has no hooks, unless it carries the `copyable` override. A record
/// whose schema is still being built on this thread, or fails to build, is
/// not copyable.
///
/// ```
/// use vc_graph::info::Typed;
/// use vc_graph::options::Options;
/// use vc_graph::schema::is_copyable;
///
/// let options = Options::new();
/// assert!(is_copyable(<Option<u32>>::type_info(), &options));
/// assert!(!is_copyable(<Vec<u32>>::type_info(), &options));
/// assert!(!is_copyable(<Box<u32>>::type_info(), &options));
/// ```
pub fn is_copyable(info: &'static TypeInfo, options: &Options) -> bool {
    match info {
        TypeInfo::Scalar(_) => true,
        TypeInfo::Optional(optional) => is_copyable(optional.some(), options),
        TypeInfo::Record(_) => {
            !cache::is_building(info.type_id(), options)
                && TypeSchema::get(info, options).is_ok_and(|schema| schema.is_copyable())
        }
        TypeInfo::Pointer(_)
        | TypeInfo::Array(_)
        | TypeInfo::Map(_)
        | TypeInfo::Collection(_)
        | TypeInfo::Dynamic(_) => false,
    }
}
