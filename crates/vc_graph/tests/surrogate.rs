use vc_graph::Graph;
use vc_graph::clone::Cloner;
use vc_graph::error::{CloneError, SurrogateChainError};
use vc_graph::options::Options;
use vc_graph::schema::TypeSchema;

#[derive(Graph, Debug, PartialEq)]
#[graph(
    factory = Celsius::zero,
    to_surrogate = Celsius::to_text,
    from_surrogate = Celsius::from_text,
)]
pub struct Celsius {
    #[graph(required)]
    pub degrees: i32,
    #[graph(exclude)]
    pub parsed: bool,
}

impl Celsius {
    fn zero() -> Self {
        Self {
            degrees: 0,
            parsed: false,
        }
    }

    fn to_text(&self) -> String {
        format!("{}C", self.degrees)
    }

    fn from_text(text: String) -> Self {
        Self {
            degrees: text.trim_end_matches('C').parse().unwrap(),
            parsed: true,
        }
    }
}

#[test]
fn clones_through_surrogate() {
    let cloner = Cloner::default();
    let copy = cloner
        .deep_typed(&Celsius {
            degrees: -4,
            parsed: false,
        })
        .unwrap();
    assert_eq!(copy.degrees, -4);
    assert!(copy.parsed);

    let schema = TypeSchema::of::<Celsius>(&Options::new()).unwrap();
    let surrogate = schema.surrogate().unwrap();
    assert!(surrogate.is_complete());
    assert!(surrogate.type_info().ty().is::<String>());
}

#[test]
fn merge_ignores_surrogate() {
    let cloner = Cloner::default();
    let mut dst = Celsius::zero();
    let src = Celsius {
        degrees: 12,
        parsed: false,
    };
    cloner.merge_typed(&mut dst, &src).unwrap();
    assert_eq!(dst.degrees, 12);
    assert!(!dst.parsed);
}

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(
    to_surrogate = Reading::to_raw,
    from_surrogate = Reading::from_raw,
    surrogate_if = Reading::is_large,
)]
pub struct Reading {
    #[graph(required)]
    pub value: u64,
    #[graph(exclude)]
    pub packed: bool,
}

impl Reading {
    fn is_large(&self) -> bool {
        self.value > 100
    }

    fn to_raw(&self) -> u64 {
        self.value
    }

    fn from_raw(value: u64) -> Self {
        Self {
            value,
            packed: true,
        }
    }
}

#[test]
fn condition_selects_surrogate() {
    let cloner = Cloner::default();

    let small = cloner
        .deep_typed(&Reading {
            value: 7,
            packed: false,
        })
        .unwrap();
    assert_eq!(small.value, 7);
    assert!(!small.packed);

    let large = cloner
        .deep_typed(&Reading {
            value: 700,
            packed: false,
        })
        .unwrap();
    assert_eq!(large.value, 700);
    assert!(large.packed);
}

#[derive(Graph, Default, Debug)]
#[graph(to_surrogate = OneWay::to_raw)]
pub struct OneWay {
    #[graph(required)]
    pub value: u8,
}

impl OneWay {
    fn to_raw(&self) -> u8 {
        self.value
    }
}

#[test]
fn cloning_needs_both_directions() {
    let cloner = Cloner::default();
    let err = cloner.deep_typed(&OneWay { value: 1 }).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Both FromSurrogate and ToSurrogate must be defined for cloning surrogate::OneWay"
    );

    // The schema itself is fine, only cloning fails.
    assert!(TypeSchema::of::<OneWay>(&Options::new()).is_ok());
}

#[derive(Graph, Default, Debug)]
#[graph(to_surrogate = First::to_second)]
pub struct First {
    #[graph(required)]
    pub value: u8,
}

impl First {
    fn to_second(&self) -> Second {
        Second { value: self.value }
    }
}

#[derive(Graph, Default, Debug)]
#[graph(to_surrogate = Second::to_raw)]
pub struct Second {
    #[graph(required)]
    pub value: u8,
}

impl Second {
    fn to_raw(&self) -> u8 {
        self.value
    }
}

#[test]
fn surrogate_chain_is_rejected() {
    let options = Options::new();
    assert!(TypeSchema::of::<First>(&options).is_ok());

    let err = TypeSchema::of::<Second>(&options).unwrap_err();
    assert_eq!(
        err,
        CloneError::SurrogateChain(SurrogateChainError {
            owner: "surrogate::Second",
            chained: "Second",
        })
    );
    assert_eq!(
        err.to_string(),
        "In type 'surrogate::Second': Surrogate chain for type 'Second'"
    );
}

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(from_surrogate = Badge::from_code)]
pub struct Badge {
    #[graph(required)]
    pub code: u32,
}

impl Badge {
    fn from_code(code: Code) -> Self {
        Self { code: code.raw }
    }
}

#[derive(Graph, Default, Debug, PartialEq)]
#[graph(to_surrogate = Code::to_raw, from_surrogate = Code::from_raw)]
pub struct Code {
    #[graph(required)]
    pub raw: u32,
}

impl Code {
    fn to_raw(&self) -> u32 {
        self.raw
    }

    fn from_raw(raw: u32) -> Self {
        Self { raw }
    }
}

#[test]
fn rebuild_source_keeps_its_own_surrogate() {
    let options = Options::new();
    let badge = TypeSchema::of::<Badge>(&options).unwrap();
    assert!(badge.surrogate().is_some_and(|surrogate| !surrogate.is_complete()));

    let code = TypeSchema::of::<Code>(&options).unwrap();
    assert!(code.surrogate().is_some_and(|surrogate| surrogate.is_complete()));

    let src = Code { raw: 42 };
    assert_eq!(Cloner::default().deep_typed(&src).unwrap(), src);
}
