use std::any::TypeId;
use std::collections::BTreeMap;

use vc_graph::Graph;
use vc_graph::clone::Cloner;
use vc_graph::generated::{GeneratedTable, GraphClone};
use vc_graph::info::Typed;
use vc_graph::options::Options;
use vc_graph::schema::TypeSchema;

// Every shape is declared twice, once interpreted and once generated.
macro_rules! twins {
    ($leaf:ident, $tree:ident $(, $generate:ident)?) => {
        #[derive(Graph, Default, Debug, PartialEq)]
        $(#[graph($generate)])?
        pub struct $leaf {
            #[graph(required)]
            pub id: u32,
            #[graph(optional)]
            pub label: Option<String>,
        }

        #[derive(Graph, Default, Debug, PartialEq)]
        $(#[graph($generate)])?
        pub struct $tree {
            #[graph(required)]
            pub root: $leaf,
            #[graph(required)]
            pub children: Vec<$leaf>,
            #[graph(optional, merge)]
            pub index: BTreeMap<String, u32>,
            #[graph(member)]
            pub weight: u16,
            #[graph(optional, serialize_if = $tree::has_children)]
            pub note: String,
        }

        impl $tree {
            fn has_children(&self, _note: &String) -> bool {
                !self.children.is_empty()
            }

            fn sample(weight: u16, children: usize) -> Self {
                Self {
                    root: $leaf {
                        id: 1,
                        label: Some(String::from("root")),
                    },
                    children: (0..children)
                        .map(|id| $leaf {
                            id: id as u32 + 2,
                            label: None,
                        })
                        .collect(),
                    index: BTreeMap::from([(String::from("root"), 1)]),
                    weight,
                    note: String::from("note"),
                }
            }
        }
    };
}

twins!(Leaf, Tree);
twins!(GenLeaf, GenTree, generate);

fn same(interpreted: &Tree, generated: &GenTree) {
    assert_eq!(format!("{interpreted:?}"), format!("{generated:?}").replace("Gen", ""));
}

#[test]
fn generated_clone_matches_interpreted() {
    let cloner = Cloner::default();
    for (weight, children) in [(0, 0), (3, 2)] {
        let interpreted = cloner.deep_typed(&Tree::sample(weight, children)).unwrap();
        let generated = GenTree::sample(weight, children).graph_clone(&cloner).unwrap();
        same(&interpreted, &generated);
    }

    let copy = GenTree::sample(0, 0).graph_clone(&cloner).unwrap();
    assert!(copy.note.is_empty());
}

#[test]
fn generated_merge_matches_interpreted() {
    let cloner = Cloner::default();

    let mut interpreted = Tree::sample(7, 1);
    cloner.merge_typed(&mut interpreted, &Tree::sample(0, 0)).unwrap();

    let mut generated = GenTree::sample(7, 1);
    generated.graph_merge(&GenTree::sample(0, 0), &cloner).unwrap();

    same(&interpreted, &generated);
    assert_eq!(generated.weight, 7);
    assert_eq!(generated.children.len(), 0);
    assert_eq!(generated.index.len(), 1);
}

#[test]
fn table_seeds_the_cloner() {
    let mut table = GeneratedTable::new();
    table.register::<GenLeaf>().register::<GenTree>();
    assert_eq!(table.len(), 2);
    assert!(table.contains(TypeId::of::<GenTree>()));
    assert!(!table.insert(vc_graph::generated::GeneratedEntry::of::<GenLeaf>()));

    let cloner = Cloner::with_generated(Options::new(), &table);
    assert!(cloner.has_cloner(TypeId::of::<GenTree>()));
    assert!(cloner.has_merger(TypeId::of::<GenLeaf>()));
    assert!(!cloner.has_cloner(TypeId::of::<Tree>()));

    let src = GenTree::sample(2, 3);
    assert_eq!(cloner.deep_typed(&src).unwrap(), src);
}

#[test]
fn generated_types_are_collected() {
    let table = GeneratedTable::collect();
    assert!(table.contains(TypeId::of::<GenLeaf>()));
    assert!(table.contains(TypeId::of::<GenTree>()));
    assert!(!table.contains(TypeId::of::<Leaf>()));
}

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(generate, to_surrogate = Packed::pack, from_surrogate = Packed::unpack)]
pub struct Packed {
    #[graph(required)]
    pub hi: u8,
    #[graph(required)]
    pub lo: u8,
}

impl Packed {
    fn pack(&self) -> u16 {
        u16::from_be_bytes([self.hi, self.lo])
    }

    fn unpack(value: u16) -> Self {
        let [hi, lo] = value.to_be_bytes();
        Self { hi, lo }
    }
}

#[derive(Graph, Default, Debug)]
#[graph(generate, from_surrogate = HalfPacked::unpack)]
pub struct HalfPacked {
    #[graph(required)]
    pub value: u16,
}

impl HalfPacked {
    fn unpack(value: u16) -> Self {
        Self { value }
    }
}

#[test]
fn generated_surrogates() {
    let cloner = Cloner::default();
    let src = Packed { hi: 1, lo: 2 };
    assert_eq!(src.graph_clone(&cloner).unwrap(), src);
    assert_eq!(cloner.deep_typed(&src).unwrap(), src);

    let err = HalfPacked { value: 1 }.graph_clone(&cloner).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Both FromSurrogate and ToSurrogate must be defined for cloning generated::HalfPacked"
    );
}

#[derive(Graph, Default)]
#[graph(auto_register, alias(read = "registered"))]
pub struct Registered {
    #[graph(required)]
    pub value: u8,
}

#[test]
fn registered_types_are_collected() {
    let types = TypeSchema::collect();
    assert!(types.iter().any(|info| info.type_id() == Registered::type_info().type_id()));

    let options = Options::new();
    TypeSchema::of::<Registered>(&options).unwrap();
    let found = TypeSchema::type_by_read_alias("registered", &options).unwrap();
    assert_eq!(found.type_id(), TypeId::of::<Registered>());
}
