use std::sync::Arc;

use vc_graph::clone::Cloner;
use vc_graph::decl::{InterfaceDecl, MemberDecl, UnknownStorage};
use vc_graph::error::CloneError;
use vc_graph::info::Typed;
use vc_graph::options::{Optionality, Options, TagMode};
use vc_graph::schema::{TypeSchema, is_copyable};
use vc_graph::{Graph, Object};

fn tags<T: Typed>(options: &Options) -> Vec<String> {
    let schema = TypeSchema::of::<T>(options).unwrap();
    schema.items().iter().map(|item| item.tag().to_owned()).collect()
}

// ---------------------------------------------------------------------- items

#[derive(Graph, Default)]
#[graph(all(optional))]
pub struct Mixed {
    pub open: u8,
    hidden: u8,
    #[graph(required)]
    secret: u8,
}

#[test]
fn private_fields_need_a_marker() {
    let schema = TypeSchema::of::<Mixed>(&Options::new()).unwrap();
    let items: Vec<_> = schema
        .items()
        .iter()
        .map(|item| (item.name(), item.optionality()))
        .collect();
    assert_eq!(
        items,
        [("open", Optionality::Optional), ("secret", Optionality::Required)]
    );
    assert_eq!(schema.required_count(), 1);
    assert_eq!(schema.policy().map(|policy| policy.optionality), Some(Optionality::Optional));
}

#[derive(Graph, Default)]
pub struct Aliased {
    #[graph(required, alias = "zz")]
    pub a: u8,
    #[graph(required)]
    pub b: u8,
    #[graph(required)]
    pub c: u8,
}

#[test]
fn tags_follow_the_mode() {
    assert_eq!(tags::<Aliased>(&Options::new()), ["b", "c", "zz"]);
    assert_eq!(
        tags::<Aliased>(&Options::new().with_tag_mode(TagMode::Names)),
        ["a", "b", "c"]
    );

    let ids = tags::<Aliased>(&Options::new().with_tag_mode(TagMode::Ids));
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| id.len() == 4 && id.chars().all(|ch| ch.is_ascii_alphabetic())));
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    let schema = TypeSchema::of::<Aliased>(&Options::new()).unwrap();
    assert_eq!(schema.item_by_tag("zz").map(|item| item.name()), Some("a"));
    assert!(schema.item_by_tag("a").is_none());
}

#[derive(Graph, Default)]
pub struct Bad {
    #[graph(required, optional)]
    pub x: i32,
}

#[derive(Graph, Default)]
pub struct Unmarked {
    pub a: u8,
}

#[derive(Graph, Default)]
#[graph(must(fields))]
pub struct Strict {
    pub a: u8,
}

#[derive(Graph, Default)]
pub struct HoldsBad {
    #[graph(optional)]
    pub inner: Option<Box<Bad>>,
}

#[test]
fn declaration_errors() {
    let options = Options::new();

    let err = TypeSchema::of::<Bad>(&options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "In type 'declare::Bad': More than one of optional, required and member attributes for field 'x'"
    );

    let err = TypeSchema::of::<Unmarked>(&options).unwrap_err();
    assert_eq!(err.to_string(), "In type 'declare::Unmarked': No serializable fields");

    let err = TypeSchema::of::<Strict>(&options).unwrap_err();
    assert_eq!(err.to_string(), "In type 'declare::Strict': Item a must be serialized");

    let err = TypeSchema::of::<HoldsBad>(&options).unwrap_err();
    assert!(err.to_string().starts_with("In type 'declare::HoldsBad': Item inner has an unusable type"));

    // Cached, the same error comes back.
    assert_eq!(TypeSchema::of::<Bad>(&options).unwrap_err(), TypeSchema::of::<Bad>(&options).unwrap_err());
}

#[test]
fn options_change_inclusion() {
    let empty = Options::new().allow_empty_types(true);
    assert!(TypeSchema::of::<Unmarked>(&empty).unwrap().items().is_empty());

    let text = "(default_policy: Some((optionality: Member, kinds: \"FIELD\")))";
    let options: Options = ron::from_str(text).unwrap();
    let schema = TypeSchema::of::<Unmarked>(&options).unwrap();
    assert_eq!(schema.items().len(), 1);
    assert_eq!(schema.items()[0].optionality(), Optionality::Member);
}

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(compact, interface = Card::titled())]
pub struct Card {
    #[graph(required, compact)]
    pub body: String,
    title: String,
}

impl Card {
    fn titled() -> InterfaceDecl {
        let title = MemberDecl::property::<String>("title", |o| {
            Some(&o.downcast_ref::<Card>()?.title as &dyn Object)
        })
        .with_setter(|o, value| {
            let Some(card) = o.downcast_mut::<Card>() else {
                return Err(value);
            };
            card.title = *value.downcast::<String>()?;
            Ok(())
        })
        .required();
        InterfaceDecl::new("Titled").with_member(title)
    }
}

#[test]
fn interface_members_become_items() {
    let schema = TypeSchema::of::<Card>(&Options::new()).unwrap();
    assert!(schema.is_compact());
    let items: Vec<_> = schema
        .items()
        .iter()
        .map(|item| (item.name(), item.is_compact()))
        .collect();
    assert_eq!(items, [("body", true), ("title", false)]);

    let src = Card {
        body: String::from("text"),
        title: String::from("head"),
    };
    assert_eq!(Cloner::default().deep_typed(&src).unwrap(), src);
}

#[derive(Graph, Default)]
#[graph(ancestor = Aliased)]
pub struct Wide {
    #[graph(required)]
    pub a: u8,
    #[graph(required)]
    pub b: u8,
    #[graph(optional)]
    pub d: u16,
}

#[derive(Graph, Default)]
#[graph(ancestor = Aliased)]
pub struct Thin {
    #[graph(required)]
    pub a: u8,
}

#[test]
fn ancestor_needs_matching_items() {
    let options = Options::new();
    let schema = TypeSchema::of::<Wide>(&options).unwrap();
    assert!(schema.allows_reading_from_ancestor());
    assert!(!TypeSchema::of::<Aliased>(&options).unwrap().allows_reading_from_ancestor());

    let err = TypeSchema::of::<Thin>(&options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "In type 'declare::Thin': Allows reading from ancestor declare::Aliased, but has 1 items instead of 3"
    );
}

#[derive(Graph, Default)]
pub struct Flat {
    #[graph(required, compact)]
    pub inner: Aliased,
    #[graph(required)]
    pub z: u16,
}

#[derive(Graph, Default)]
pub struct Nested {
    #[graph(required)]
    pub inner: Aliased,
}

#[test]
fn primitive_children_flatten_compact_items() {
    let options = Options::new();
    let count = |schema: Arc<TypeSchema>| schema.count_primitive_children();
    assert_eq!(TypeSchema::of::<Aliased>(&options).map(count), Ok(Some(3)));
    assert_eq!(TypeSchema::of::<Flat>(&options).map(count), Ok(Some(4)));
    assert_eq!(TypeSchema::of::<Nested>(&options).map(count), Ok(None));
}

#[derive(Graph, Default)]
pub struct SameAlias {
    #[graph(required, alias = "x")]
    pub b: u8,
    #[graph(required, alias = "x")]
    pub a: u8,
}

#[derive(Graph, Default)]
pub struct EmptyAlias {
    #[graph(required, alias = "")]
    pub a: u8,
}

#[derive(Graph, Default)]
pub struct SpacedAlias {
    #[graph(required, alias = "a b")]
    pub a: u8,
}

#[derive(Graph, Default)]
#[graph(interface = Shadowed::shadow())]
pub struct Shadowed {
    #[graph(required, alias = "other")]
    pub body: u8,
}

impl Shadowed {
    fn shadow() -> InterfaceDecl {
        let body = MemberDecl::property::<u8>("body", |o| {
            Some(&o.downcast_ref::<Shadowed>()?.body as &dyn Object)
        })
        .with_setter(|o, value| {
            let Some(shadowed) = o.downcast_mut::<Shadowed>() else {
                return Err(value);
            };
            shadowed.body = *value.downcast::<u8>()?;
            Ok(())
        })
        .required();
        InterfaceDecl::new("Body").with_member(body)
    }
}

#[derive(Graph, Default)]
pub struct ScalarMerge {
    #[graph(required, merge)]
    pub x: u32,
}

#[derive(Graph, Default)]
#[graph(ancestor = Looped)]
pub struct Looped {
    #[graph(required)]
    pub a: u8,
}

#[test]
fn tag_and_member_errors() {
    let options = Options::new();
    let message = |result: Result<Arc<TypeSchema>, CloneError>| match result {
        Ok(_) => String::from("ok"),
        Err(err) => err.to_string(),
    };

    assert_eq!(
        message(TypeSchema::of::<SameAlias>(&options)),
        "In type 'declare::SameAlias': Duplicate item a / x"
    );
    assert_eq!(
        message(TypeSchema::of::<EmptyAlias>(&options)),
        "In type 'declare::EmptyAlias': Empty tag for field 'a'"
    );
    assert_eq!(
        message(TypeSchema::of::<SpacedAlias>(&options)),
        "In type 'declare::SpacedAlias': Bad character ' ' in tag for field 'a'"
    );
    assert_eq!(
        message(TypeSchema::of::<ScalarMerge>(&options)),
        "In type 'declare::ScalarMerge': Unable to either set or merge item x"
    );
    assert_eq!(
        message(TypeSchema::of::<Looped>(&options)),
        "In type 'declare::Looped': Schema requested while it is being built"
    );

    // Aliases differ, names do not.
    assert_eq!(message(TypeSchema::of::<Shadowed>(&options)), "ok");
    let names = Options::new().with_tag_mode(TagMode::Names);
    assert_eq!(
        message(TypeSchema::of::<Shadowed>(&names)),
        "In type 'declare::Shadowed': Duplicate tag 'body' for field 'body'"
    );
}

// ---------------------------------------------------------------------- members

#[derive(Graph, Default, Debug, PartialEq)]
pub struct Defaults {
    #[graph(member)]
    pub a: u32,
    #[graph(required)]
    pub b: u32,
}

#[test]
fn member_items_skip_default_values() {
    let cloner = Cloner::default();

    let mut dst = Defaults { a: 5, b: 5 };
    cloner.merge_typed(&mut dst, &Defaults { a: 0, b: 0 }).unwrap();
    assert_eq!(dst, Defaults { a: 5, b: 0 });

    cloner.merge_typed(&mut dst, &Defaults { a: 3, b: 1 }).unwrap();
    assert_eq!(dst, Defaults { a: 3, b: 1 });
}

#[derive(Graph, Default, Debug)]
pub struct Annotated {
    #[graph(required)]
    pub name: String,
    #[graph(unknown)]
    pub extra: UnknownStorage,
    #[graph(exclude)]
    pub cache: Vec<u8>,
}

#[test]
fn unknown_and_excluded_fields_stay_behind() {
    let mut src = Annotated {
        name: String::from("a"),
        cache: vec![1, 2, 3],
        ..Annotated::default()
    };
    src.extra.add("legacy", Box::new(4_u32));

    let schema = TypeSchema::of::<Annotated>(&Options::new()).unwrap();
    assert_eq!(schema.items().len(), 1);
    let unknown = schema.unknown().unwrap();
    assert_eq!(unknown.name, "extra");
    assert_eq!((unknown.get)(&src).map(UnknownStorage::len), Some(1));

    let copy = Cloner::default().deep_typed(&src).unwrap();
    assert_eq!(copy.name, "a");
    assert!(copy.extra.is_empty());
    assert!(copy.cache.is_empty());
}

// ---------------------------------------------------------------------- kinds

#[derive(Graph, Clone, Copy, PartialEq, Debug)]
#[graph(scalar)]
pub enum Faction {
    Red,
    Blue,
}

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(value)]
pub struct Unit {
    #[graph(required)]
    pub faction: Option<Faction>,
    #[graph(required)]
    pub level: u8,
}

#[test]
fn scalar_enums_are_copied() {
    let options = Options::new();
    assert!(is_copyable(Faction::type_info(), &options));
    assert!(is_copyable(Unit::type_info(), &options));

    let src = Unit {
        faction: Some(Faction::Blue),
        level: 3,
    };
    assert_eq!(Cloner::default().deep_typed(&src).unwrap(), src);
    assert_ne!(Faction::Red, Faction::Blue);
}

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(collection, item_if = Evens::keep)]
pub struct Evens(Vec<u32>);

impl Evens {
    fn keep(&self, _index: usize, element: &dyn Object) -> bool {
        element.downcast_ref::<u32>().is_some_and(|value| value % 2 == 0)
    }
}

#[derive(Graph, Default, Debug, PartialEq)]
pub struct Bag {
    #[graph(required)]
    pub evens: Evens,
}

#[test]
fn collection_newtype_filters_elements() {
    let cloner = Cloner::default();
    let src = Bag {
        evens: Evens(vec![1, 2, 3, 4]),
    };
    let copy = cloner.deep_typed(&src).unwrap();
    assert_eq!(copy.evens, Evens(vec![2, 4]));

    let mut dst = Evens(vec![8]);
    cloner.merge_typed(&mut dst, &Evens(vec![5, 6])).unwrap();
    assert_eq!(dst, Evens(vec![8, 6]));
}

#[derive(Graph, Default, Debug, PartialEq)]
pub struct Pair<T> {
    #[graph(required)]
    pub left: T,
    #[graph(required)]
    pub right: T,
}

#[test]
fn generic_records() {
    let cloner = Cloner::default();
    let src = Pair {
        left: String::from("l"),
        right: String::from("r"),
    };
    assert_eq!(cloner.deep_typed(&src).unwrap(), src);

    let nested = Pair {
        left: Pair { left: 1_u8, right: 2 },
        right: Pair { left: 3, right: 4 },
    };
    assert_eq!(cloner.deep_typed(&nested).unwrap(), nested);
    assert_ne!(
        Pair::<u8>::type_info().type_id(),
        Pair::<String>::type_info().type_id()
    );
}
