use std::sync::{Mutex, MutexGuard, PoisonError};

use vc_graph::Graph;
use vc_graph::clone::Cloner;
use vc_graph::generated::GraphClone;

static LOG: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn log() -> MutexGuard<'static, Vec<String>> {
    LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

fn take_log() -> Vec<String> {
    std::mem::take(&mut *log())
}

macro_rules! traced {
    ($name:ident $(, $generate:ident)?) => {
        #[derive(Graph, Debug, PartialEq)]
        #[graph(
            $($generate,)?
            factory = $name::make,
            before_serialization = $name::before_ser,
            after_serialization = $name::after_ser,
            before_deserialization = $name::before_de,
            after_deserialization = $name::after_de,
        )]
        pub struct $name {
            #[graph(required)]
            pub value: u32,
        }

        impl $name {
            fn make() -> Self {
                log().push(String::from("construct"));
                Self { value: 0 }
            }

            fn before_ser(&self) {
                log().push(format!("before_ser {}", self.value));
            }

            fn after_ser(&self) {
                log().push(format!("after_ser {}", self.value));
            }

            fn before_de(&mut self) {
                log().push(format!("before_de {}", self.value));
            }

            fn after_de(&mut self) {
                log().push(format!("after_de {}", self.value));
            }
        }
    };
}

traced!(Interpreted);
traced!(Generated, generate);

const CLONE_ORDER: [&str; 5] = [
    "before_ser 7",
    "construct",
    "before_de 0",
    "after_ser 7",
    "after_de 7",
];

const MERGE_ORDER: [&str; 4] = ["before_ser 7", "before_de 1", "after_ser 7", "after_de 7"];

// The log is shared, the whole sequence runs in one test.
#[test]
fn hooks_fire_once_in_order() {
    let cloner = Cloner::default();

    take_log();

    let copy = cloner.deep_typed(&Interpreted { value: 7 }).unwrap();
    assert_eq!(copy.value, 7);
    assert_eq!(take_log(), CLONE_ORDER);

    let copy = Generated { value: 7 }.graph_clone(&cloner).unwrap();
    assert_eq!(copy.value, 7);
    assert_eq!(take_log(), CLONE_ORDER);

    let mut dst = Interpreted { value: 1 };
    cloner.merge_typed(&mut dst, &Interpreted { value: 7 }).unwrap();
    assert_eq!(dst.value, 7);
    assert_eq!(take_log(), MERGE_ORDER);

    let mut dst = Generated { value: 1 };
    dst.graph_merge(&Generated { value: 7 }, &cloner).unwrap();
    assert_eq!(dst.value, 7);
    assert_eq!(take_log(), MERGE_ORDER);
}

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(value)]
pub struct Plain {
    #[graph(required)]
    pub a: u8,
    #[graph(required)]
    pub b: Option<u16>,
}

#[derive(Graph, Default)]
#[graph(value, after_deserialization = Touched::touch)]
pub struct Touched {
    #[graph(required)]
    pub a: u8,
}

impl Touched {
    fn touch(&mut self) {}
}

#[test]
fn hooks_make_values_non_copyable() {
    use vc_graph::info::Typed;
    use vc_graph::options::Options;
    use vc_graph::schema::is_copyable;

    let options = Options::new();
    assert!(is_copyable(Plain::type_info(), &options));
    assert!(!is_copyable(Touched::type_info(), &options));
}
