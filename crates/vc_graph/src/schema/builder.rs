use alloc::string::{String, ToString};
use alloc::vec::Vec;
use std::sync::OnceLock;

use crate::decl::{FactoryDecl, MemberDecl, Named, Receiver, TypeDecl};
use crate::error::{CloneError, SchemaError, SchemaErrorKind};
use crate::info::{TypeInfo, TypeKind};
use crate::options::{InclusionPolicy, MemberKind, Optionality, Options, TagMode};
use crate::schema::{Item, Predicate, TypeSchema, aliases, cache, ids, is_copyable, surrogate};

/// Builds the schema of `info` from its declaration.
///
/// Types without a declaration get an empty one, which is valid for every
/// kind except records.
pub(crate) fn build(info: &'static TypeInfo, options: &Options) -> Result<TypeSchema, CloneError> {
    let decl = info
        .declaration()
        .unwrap_or_else(|| TypeDecl::of_type(*info.ty()));
    let fail = |kind| CloneError::from(SchemaError::new(info.type_path(), kind));

    let policy = decl.all.or(options.default_policy);

    // ------------------------------------------------------------ members

    let mut items = Vec::new();
    let mut copyable = decl.value;
    let members = decl
        .interfaces
        .iter()
        .flat_map(|interface| interface.members.iter())
        .chain(decl.members.iter());

    for member in members {
        let Some(item) = build_item(member, policy, decl.must, options).map_err(fail)? else {
            continue;
        };
        copyable &= item.copyable;
        items.push(item);
    }

    let required_count = items.iter().filter(|item| !item.is_optional()).count();

    // ------------------------------------------------------------ methods

    let unknown = match decl.unknown.as_slice() {
        [] => None,
        [one] => Some(*one),
        [_, second, ..] => {
            return Err(fail(SchemaErrorKind::DuplicateUnknownStorage(second.name.into())));
        }
    };

    let mut item_if: Option<Named<_>> = None;
    for test in &decl.item_ifs {
        if item_if.is_some() {
            return Err(fail(SchemaErrorKind::DuplicateItemIf));
        }
        if info.kind() != TypeKind::Collection {
            return Err(fail(SchemaErrorKind::ItemIfOutsideCollection));
        }
        item_if = Some(*test);
    }

    let mut factory: Option<&FactoryDecl> = None;
    for candidate in &decl.factories {
        if let Some(previous) = factory {
            return Err(fail(SchemaErrorKind::DuplicateFactory(
                previous.name.into(),
                candidate.name.into(),
            )));
        }
        if candidate.sig.receiver != Receiver::Static || !candidate.sig.params.is_empty() {
            return Err(fail(SchemaErrorKind::BadFactory(candidate.name.into())));
        }
        factory = Some(candidate);
    }

    let surrogate = surrogate::resolve(info, &decl, options)?;

    if surrogate.is_none() {
        match info.kind() {
            TypeKind::Collection if !items.is_empty() => {
                return Err(fail(SchemaErrorKind::FieldsInCollection));
            }
            TypeKind::Record if items.is_empty() && !options.allow_empty_types => {
                return Err(fail(SchemaErrorKind::NoSerializableFields));
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------ tags

    items.sort_by(|a, b| a.alias.cmp(b.alias));
    if let Some(pair) = items.windows(2).find(|pair| pair[0].alias == pair[1].alias) {
        return Err(fail(SchemaErrorKind::DuplicateItem(
            pair[1].name.into(),
            pair[1].alias.into(),
        )));
    }

    for item in &mut items {
        item.tag = match options.tag_mode {
            TagMode::Aliases => item.alias.into(),
            TagMode::Names => item.name.into(),
            TagMode::Ids => {
                let id = ids::next_id();
                item.id = Some(id.clone());
                id
            }
        };
    }
    items.sort_by(|a, b| a.tag.cmp(&b.tag));

    for item in &items {
        if item.tag.is_empty() {
            return Err(fail(SchemaErrorKind::EmptyTag(item.name.into())));
        }
        if let Some(ch) = item.tag.chars().find(|&ch| ch <= ' ' || ch >= '\u{7f}') {
            return Err(fail(SchemaErrorKind::BadCharacter(ch, item.name.into())));
        }
    }
    if let Some(pair) = items.windows(2).find(|pair| pair[0].tag == pair[1].tag) {
        return Err(fail(SchemaErrorKind::DuplicateTag(
            pair[1].tag.clone(),
            pair[1].name.into(),
        )));
    }

    // ------------------------------------------------------------ ancestor

    if let Some(ancestor) = decl.ancestor() {
        let base = TypeSchema::get(ancestor, options)?;
        if base.items.len() != items.len() {
            return Err(fail(SchemaErrorKind::AncestorMismatch {
                ancestor: ancestor.type_path(),
                items: items.len(),
                expected: base.items.len(),
            }));
        }
    }

    aliases::register(info, &decl.read_aliases, decl.write_alias, options).map_err(fail)?;

    let copyable = decl.copyable || (copyable && decl.hooks.is_empty());

    Ok(TypeSchema {
        info,
        options: *options,
        items,
        compact: decl.compact,
        copyable,
        required_count,
        policy,
        must: decl.must,
        allow_reading_from_ancestor: decl.ancestor.is_some(),
        surrogate,
        write_alias: decl.write_alias,
        factory: factory.cloned(),
        constructor: decl.constructor.clone(),
        hooks: decl.hooks.clone(),
        item_if,
        unknown,
        default: OnceLock::new(),
    })
}

/// The item for `member`, `None` when the member is not eligible.
fn build_item(
    member: &MemberDecl,
    policy: Option<InclusionPolicy>,
    must: MemberKind,
    options: &Options,
) -> Result<Option<Item>, SchemaErrorKind> {
    if member.exclude {
        return Ok(None);
    }

    let optionality = match member.markers.as_slice() {
        [] => match policy {
            Some(policy) if member.public && policy.kinds.intersects(member.kind) => {
                policy.optionality
            }
            _ if member.public && must.intersects(member.kind) => {
                return Err(SchemaErrorKind::MustBeSerialized(member.name.into()));
            }
            _ => return Ok(None),
        },
        [marker] => *marker,
        _ => return Err(SchemaErrorKind::MultipleMarkers(member.name.into())),
    };

    let info = member.type_info();
    let set = if member.merge { None } else { member.set };
    if set.is_none() && !(info.is_mergeable() && member.get_mut.is_some()) {
        return Err(SchemaErrorKind::UnableToSetOrMerge(member.name.into()));
    }

    resolve_nested(info, options).map_err(|err| SchemaErrorKind::UnclassifiableItem {
        item: member.name.into(),
        reason: err.to_string(),
    })?;

    let item_decl = info.declaration();
    let compact = member.compact || item_decl.as_ref().is_some_and(TypeDecl::is_compact);
    let copyable = item_decl.as_ref().is_some_and(TypeDecl::is_copyable_override)
        || is_copyable(info, options);

    let predicate = match member.serialize_if {
        Some(test) => Some(Predicate::Explicit(test)),
        None if optionality == Optionality::Member => Some(Predicate::DiffersFromDefault),
        None => None,
    };

    Ok(Some(Item {
        name: member.name,
        alias: member.alias.unwrap_or(member.name),
        id: None,
        tag: String::new(),
        kind: member.kind,
        optionality,
        compact,
        copyable,
        info: member.info,
        get: member.get,
        get_mut: member.get_mut,
        set,
        predicate,
    }))
}

/// Builds the schemas of records reachable through options and pointers.
///
/// Records already being built on this thread are skipped, their schema is
/// finished by the outer build.
fn resolve_nested(info: &'static TypeInfo, options: &Options) -> Result<(), CloneError> {
    match info {
        TypeInfo::Optional(optional) => resolve_nested(optional.some(), options),
        TypeInfo::Pointer(pointer) => resolve_nested(pointer.pointee(), options),
        TypeInfo::Record(_) if !cache::is_building(info.type_id(), options) => {
            TypeSchema::get(info, options).map(drop)
        }
        _ => Ok(()),
    }
}
