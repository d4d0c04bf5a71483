use std::any::TypeId;
use std::collections::BTreeMap;

use vc_graph::{Graph, Object};
use vc_graph::clone::Cloner;
use vc_graph::info::Typed;
use vc_graph::options::Options;
use vc_graph::schema::{TypeSchema, is_copyable};

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(all(required))]
pub struct Sample1 {
    pub x: i32,
    pub y: String,
}

#[derive(Graph, Default, Debug, PartialEq)]
pub struct Node {
    #[graph(required)]
    pub value: u32,
    #[graph(optional)]
    pub next: Option<Box<Node>>,
}

#[derive(Graph, Default, Debug, PartialEq)]
pub struct Holder {
    #[graph(required)]
    pub tag: u8,
    #[graph(optional)]
    pub node: Option<Box<Node>>,
}

#[derive(Graph, Default, Debug, PartialEq)]
pub struct SampleMerge {
    #[graph(required, merge)]
    pub di: BTreeMap<i32, i32>,
    #[graph(required, merge)]
    pub li: Vec<i32>,
    #[graph(optional, merge)]
    pub m: Box<Sample1>,
}

#[derive(Graph, Debug, PartialEq)]
#[graph(factory = Named::unnamed)]
pub struct Named {
    #[graph(required, serialize_if = Named::has_name)]
    pub name: String,
    #[graph(required)]
    pub id: u32,
}

impl Named {
    fn unnamed() -> Self {
        Self {
            name: String::from("unnamed"),
            id: 0,
        }
    }

    fn has_name(&self, name: &String) -> bool {
        !name.is_empty()
    }
}

#[test]
fn scenario_a_simple_record() {
    let cloner = Cloner::default();
    let src = Sample1 {
        x: 9,
        y: String::from("qwe"),
    };
    let copy = cloner.deep_typed(&src).unwrap();
    assert_eq!(copy.x, 9);
    assert_eq!(copy.y, "qwe");
    assert_ne!(copy.y.as_ptr(), src.y.as_ptr());
}

#[test]
fn scenario_b_copyable_array() {
    let cloner = Cloner::default();
    let src: Box<[i32]> = Box::new([2, 4, 5, 6, 8]);
    let copy = cloner.deep_typed(&src).unwrap();
    assert_eq!(copy, src);
    assert_ne!(copy.as_ptr(), src.as_ptr());

    let fixed = [2, 4, 5, 6, 8];
    assert_eq!(cloner.deep_typed(&fixed).unwrap(), fixed);
}

#[test]
fn scenario_c_absent_self_reference() {
    let cloner = Cloner::default();
    let src = Holder { tag: 3, node: None };
    let copy = cloner.deep_typed(&src).unwrap();
    assert_eq!(copy, src);
    assert!(cloner.has_cloner(TypeId::of::<Holder>()));
    assert!(!cloner.has_cloner(TypeId::of::<Node>()));
}

#[test]
fn scenario_d_map_of_records() {
    let cloner = Cloner::default();
    let src = BTreeMap::from([
        (String::from("a"), Sample1 { x: 1, y: String::from("one") }),
        (String::from("b"), Sample1 { x: 2, y: String::from("two") }),
    ]);
    let copy = cloner.deep_typed(&src).unwrap();
    assert_eq!(copy, src);
    for (key, value) in &copy {
        assert_ne!(value.y.as_ptr(), src[key].y.as_ptr());
    }
}

#[test]
fn scenario_e_merge() {
    let cloner = Cloner::default();
    let mut dst = SampleMerge {
        di: BTreeMap::from([(3, 4)]),
        li: vec![33],
        m: Box::new(Sample1 { x: 1, y: String::from("old") }),
    };
    let src = SampleMerge {
        di: BTreeMap::from([(5, 6)]),
        li: vec![77],
        m: Box::new(Sample1 { x: 2, y: String::from("new") }),
    };
    let nested: *const Sample1 = &*dst.m;

    cloner.merge_typed(&mut dst, &src).unwrap();

    assert_eq!(dst.di, BTreeMap::from([(3, 4), (5, 6)]));
    assert_eq!(dst.li, [33, 77]);
    assert!(std::ptr::eq(nested, &*dst.m));
    assert_eq!(*dst.m, Sample1 { x: 2, y: String::from("new") });
}

#[test]
fn self_referential_schema() {
    let schema = TypeSchema::of::<Node>(&Options::new()).unwrap();
    assert_eq!(schema.items().len(), 2);
    assert!(!is_copyable(Node::type_info(), &Options::new()));

    let cloner = Cloner::default();
    let src = Node {
        value: 1,
        next: Some(Box::new(Node {
            value: 2,
            next: Some(Box::new(Node { value: 3, next: None })),
        })),
    };
    let copy = cloner.deep_typed(&src).unwrap();
    assert_eq!(copy, src);

    let (Some(a), Some(b)) = (&copy.next, &src.next) else {
        panic!("next was dropped");
    };
    assert!(!std::ptr::eq(&**a, &**b));
}

#[test]
fn false_predicate_keeps_destination() {
    let cloner = Cloner::default();
    let src = Named {
        name: String::new(),
        id: 4,
    };
    let copy = cloner.deep_typed(&src).unwrap();
    assert_eq!(copy.name, "unnamed");
    assert_eq!(copy.id, 4);

    let mut dst = Named {
        name: String::from("keep"),
        id: 1,
    };
    cloner.merge_typed(&mut dst, &src).unwrap();
    assert_eq!(dst.name, "keep");
    assert_eq!(dst.id, 4);
}

#[test]
fn deep_copies_are_dynamic_too() {
    let cloner = Cloner::default();
    let src: Box<dyn Object> = Box::new(Sample1 {
        x: 5,
        y: String::from("dyn"),
    });
    let copy = cloner.deep(&*src).unwrap();
    assert_eq!((*copy).object_eq(&*src), Some(true));
    assert_eq!(copy.downcast_ref::<Sample1>().map(|s| s.x), Some(5));
}
