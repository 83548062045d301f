use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::any::TypeId;

use autosave_bundle::{Bundle, BundleError, BundleValue, Size, ValueKind};

use super::{StateCopier, register_restore, register_save};
use crate::derive::{AutoSave, Parcelable};
use crate::registry::{CodecRegistry, CodecRegistryArc};
use crate::{DynamicAutoSave, StateError, scan};

#[derive(Parcelable, Clone, Debug, PartialEq)]
struct PDemo {
    name: String,
    boolean: bool,
}

impl Default for PDemo {
    fn default() -> Self {
        Self {
            name: "PDemo".into(),
            boolean: false,
        }
    }
}

#[derive(AutoSave, Clone, Debug, PartialEq, Default)]
struct Screen {
    #[auto_save]
    a: i32,
    #[auto_save]
    b: String,
    #[auto_save]
    c: bool,
    #[auto_save]
    d: Vec<i32>,
    #[auto_save("demo_list")]
    demos: Vec<PDemo>,
    #[auto_save]
    single: Option<PDemo>,
    #[auto_save]
    sparse: BTreeMap<i32, PDemo>,
    #[auto_save]
    size: Size,
    #[auto_save]
    note: Option<String>,
    transient: u64,
}

fn sample_screen() -> Screen {
    let mut sparse = BTreeMap::new();
    sparse.insert(4, PDemo::default());
    Screen {
        a: 10,
        b: "hahah".into(),
        c: false,
        d: vec![1, 2, 3],
        demos: vec![
            PDemo::default(),
            PDemo {
                name: "second".into(),
                boolean: true,
            },
        ],
        single: Some(PDemo::default()),
        sparse,
        size: Size::new(640, 480),
        note: None,
        transient: 99,
    }
}

#[derive(AutoSave, Debug, Default)]
struct Base {
    #[auto_save]
    a: i32,
}

#[derive(AutoSave, Debug, Default)]
struct Extended {
    #[auto_save(parent)]
    base: Base,
    #[auto_save]
    b: i32,
}

struct Opaque;

#[derive(AutoSave)]
struct Strict {
    #[auto_save]
    ok: i32,
    #[auto_save]
    opaque: Opaque,
}

#[derive(AutoSave)]
struct Lenient {
    #[auto_save]
    ok: i32,
    #[auto_save(ignore_invalid_type)]
    opaque: Opaque,
}

#[derive(AutoSave, Debug, Default)]
struct Counters {
    #[auto_save]
    first: i32,
    #[auto_save]
    count: i32,
    #[auto_save(key = "label", ignore_invalid_type)]
    label: String,
}

#[test]
fn round_trip_restores_equal_object() {
    let screen = sample_screen();
    let saved = register_save(&screen).unwrap();

    let mut restored = Screen::default();
    register_restore(&mut restored, Some(&saved), None).unwrap();

    // Unmarked fields are not carried over.
    assert_eq!(restored.transient, 0);
    restored.transient = screen.transient;
    assert_eq!(restored, screen);
}

#[test]
fn save_writes_storage_keys_and_kinds() {
    let saved = register_save(&sample_screen()).unwrap();

    assert_eq!(saved.get("a"), Some(&BundleValue::Int(10)));
    assert_eq!(saved.get("d"), Some(&BundleValue::IntArray(vec![1, 2, 3])));
    assert_eq!(
        saved.get("demo_list").map(BundleValue::kind),
        Some(ValueKind::ParcelableArray)
    );
    assert_eq!(
        saved.get("sparse").map(BundleValue::kind),
        Some(ValueKind::SparseParcelableArray)
    );
    assert!(!saved.contains_key("demos"));
    assert!(!saved.contains_key("transient"));
    // An empty optional writes nothing.
    assert!(!saved.contains_key("note"));
}

#[test]
fn save_is_idempotent() {
    let screen = sample_screen();
    let first = register_save(&screen).unwrap();
    let second = register_save(&screen).unwrap();

    assert_eq!(first, second);

    #[cfg(feature = "serde")]
    {
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert_eq!(
            ron::to_string(&first).unwrap(),
            ron::to_string(&second).unwrap()
        );
    }
}

#[test]
fn restore_state_wins_over_fallback() {
    let mut state = Bundle::new();
    state.put("count", &1_i32);
    let mut args = Bundle::new();
    args.put("count", &2_i32);
    args.put("first", &7_i32);

    let mut counters = Counters::default();
    register_restore(&mut counters, Some(&state), Some(&args)).unwrap();

    assert_eq!(counters.count, 1);
    assert_eq!(counters.first, 7);
}

#[test]
fn fallback_only_on_first_creation() {
    let mut args = Bundle::new();
    args.put("count", &2_i32);

    let mut counters = Counters::default();
    register_restore(&mut counters, None, Some(&args)).unwrap();
    assert_eq!(counters.count, 2);
}

#[test]
fn absent_keys_leave_fields_unchanged() {
    let mut counters = Counters {
        first: 3,
        count: 4,
        label: "keep".into(),
    };

    register_restore(&mut counters, None, None).unwrap();
    register_restore(&mut counters, Some(&Bundle::new()), Some(&Bundle::new())).unwrap();

    assert_eq!(counters.first, 3);
    assert_eq!(counters.count, 4);
    assert_eq!(counters.label, "keep");
}

#[test]
fn unsupported_type_fails_in_strict_mode() {
    let strict = Strict {
        ok: 1,
        opaque: Opaque,
    };

    match register_save(&strict) {
        Err(StateError::UnsupportedFieldType(err)) => {
            assert_eq!(err.field, "opaque");
            assert!(err.type_name.ends_with("Opaque"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn unsupported_type_is_skipped_when_ignored() {
    let lenient = Lenient {
        ok: 1,
        opaque: Opaque,
    };

    let saved = register_save(&lenient).unwrap();
    assert_eq!(saved.len(), 1);
    assert!(!saved.contains_key("opaque"));

    let mut state = Bundle::new();
    state.put("ok", &5_i32);
    state.put("opaque", &5_i32);

    let mut target = Lenient {
        ok: 0,
        opaque: Opaque,
    };
    register_restore(&mut target, Some(&state), None).unwrap();
    assert_eq!(target.ok, 5);
}

#[test]
fn type_mismatch_fails_in_strict_mode() {
    let mut state = Bundle::new();
    state.put("first", &11_i32);
    state.put("count", &String::from("not a number"));

    let mut counters = Counters::default();
    match register_restore(&mut counters, Some(&state), None) {
        Err(StateError::TypeMismatch(err)) => {
            assert_eq!(err.key, "count");
            assert_eq!(err.found, ValueKind::String);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    // Partial application before the error is kept.
    assert_eq!(counters.first, 11);
    assert_eq!(counters.count, 0);
}

#[test]
fn type_mismatch_is_skipped_when_ignored() {
    let mut state = Bundle::new();
    state.put("label", &42_i32);
    state.put("count", &6_i32);

    let mut counters = Counters {
        label: "old".into(),
        ..Counters::default()
    };
    register_restore(&mut counters, Some(&state), None).unwrap();

    assert_eq!(counters.label, "old");
    assert_eq!(counters.count, 6);
}

#[test]
fn inherited_fields_are_saved_and_restored() {
    let info = scan::<Extended>().unwrap();
    assert_eq!(info.field_len(), 2);
    assert!(info.field("a").unwrap().is_inherited());

    let source = Extended {
        base: Base { a: 1 },
        b: 10,
    };
    let saved = register_save(&source).unwrap();
    assert_eq!(saved.read::<i32>("a").unwrap(), Some(1));
    assert_eq!(saved.read::<i32>("b").unwrap(), Some(10));

    let mut target = Extended::default();
    register_restore(&mut target, Some(&saved), None).unwrap();
    assert_eq!(target.base.a, 1);
    assert_eq!(target.b, 10);
}

#[test]
fn copier_rejects_foreign_target() {
    let registry = CodecRegistry::new();
    let copier = StateCopier::new(&registry);
    let info = scan::<Counters>().unwrap();

    assert_eq!(
        copier.save(&5_u8, info).unwrap_err(),
        StateError::TargetMismatch {
            expected: info.type_name()
        }
    );
}

#[derive(AutoSave, Debug, Default)]
struct Holder<T> {
    #[auto_save]
    value: T,
    #[auto_save]
    version: i32,
}

#[test]
fn copier_uses_its_own_registry() {
    // A bare type parameter has no codec of its own, the registry decides.
    let info = scan::<Holder<u32>>().unwrap();
    assert!(info.field("value").unwrap().codec().is_none());
    assert!(info.field("version").unwrap().codec().is_some());

    let holder = Holder {
        value: 3_u32,
        version: 1,
    };

    let empty = CodecRegistry::empty();
    let err = StateCopier::new(&empty).save(&holder, info).unwrap_err();
    assert!(matches!(err, StateError::UnsupportedFieldType(e) if e.field == "value"));

    let registry = CodecRegistry::new();
    let saved = StateCopier::new(&registry).save(&holder, info).unwrap();
    assert_eq!(saved.get("value"), Some(&BundleValue::Int(3)));
    assert_eq!(saved.get("version"), Some(&BundleValue::Int(1)));
}

#[test]
fn copier_debug_lists_registered_types() {
    let mut registry = CodecRegistry::empty();
    registry.register::<i32>();
    let copier = StateCopier::new(&registry);

    assert_eq!(format!("{copier:?}"), r#"StateCopier { registry: ["i32"] }"#);
    assert_eq!(
        format!("{:?}", CodecRegistryArc::new(CodecRegistry::empty())),
        "[]"
    );
}

// Neither registered by hand nor marked `auto_register`.
#[derive(Parcelable, Clone, Debug, PartialEq, Default)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(AutoSave, Debug, Default)]
struct HasPoint {
    #[auto_save]
    a: i32,
    #[auto_save]
    p: Point,
}

#[derive(AutoSave, Debug, Default)]
struct HasPointLenient {
    #[auto_save]
    a: i32,
    #[auto_save(ignore_invalid_type)]
    p: Point,
    #[auto_save(ignore_invalid_type)]
    path: Vec<Point>,
}

#[test]
fn unregistered_parcelable_fields_are_supported() {
    assert!(!CodecRegistryArc::global().read().contains(TypeId::of::<Point>()));

    let source = HasPoint {
        a: 1,
        p: Point { x: 1, y: 2 },
    };
    let saved = register_save(&source).unwrap();
    assert_eq!(
        saved.get("p").map(BundleValue::kind),
        Some(ValueKind::Parcelable)
    );

    let mut target = HasPoint::default();
    register_restore(&mut target, Some(&saved), None).unwrap();
    assert_eq!(target.p, Point { x: 1, y: 2 });

    let lenient = HasPointLenient {
        a: 1,
        p: Point { x: 3, y: 4 },
        path: vec![Point { x: 5, y: 6 }],
    };
    let saved = register_save(&lenient).unwrap();
    assert_eq!(saved.len(), 3);

    let mut target = HasPointLenient::default();
    register_restore(&mut target, Some(&saved), None).unwrap();
    assert_eq!(target.p, Point { x: 3, y: 4 });
    assert_eq!(target.path, vec![Point { x: 5, y: 6 }]);
}

#[derive(AutoSave, Debug, Default, PartialEq)]
struct Samples {
    #[auto_save(ignore_invalid_type)]
    bytes: Vec<i8>,
    #[auto_save(ignore_invalid_type)]
    shorts: Vec<u16>,
    #[auto_save(ignore_invalid_type)]
    ints: Vec<u32>,
    #[auto_save(ignore_invalid_type)]
    longs: Vec<u64>,
    #[auto_save(ignore_invalid_type)]
    triple: [i32; 3],
    #[auto_save]
    flags: Option<[bool; 2]>,
}

#[test]
fn primitive_arrays_are_saved() {
    let source = Samples {
        bytes: vec![-1, 2],
        shorts: vec![u16::MAX],
        ints: vec![u32::MAX, 7],
        longs: vec![u64::MAX],
        triple: [1, 2, 3],
        flags: Some([true, false]),
    };
    let saved = register_save(&source).unwrap();

    assert_eq!(
        saved.keys().collect::<Vec<_>>(),
        ["bytes", "flags", "ints", "longs", "shorts", "triple"]
    );
    assert_eq!(saved.get("bytes"), Some(&BundleValue::ByteArray(vec![255, 2])));
    assert_eq!(saved.get("ints"), Some(&BundleValue::IntArray(vec![-1, 7])));
    assert_eq!(saved.get("triple"), Some(&BundleValue::IntArray(vec![1, 2, 3])));

    let mut target = Samples::default();
    register_restore(&mut target, Some(&saved), None).unwrap();
    assert_eq!(target, source);
}

#[test]
fn fixed_array_length_is_checked() {
    let mut state = Bundle::new();
    state.put("flags", &vec![true, false, true]);

    let mut target = Samples::default();
    match register_restore(&mut target, Some(&state), None) {
        Err(StateError::TypeMismatch(err)) => {
            assert_eq!(err.key, "flags");
            assert_eq!(
                err.source,
                BundleError::LengthMismatch {
                    expected: 2,
                    found: 3
                }
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }

    // Lenient fields keep their value.
    state.put("triple", &vec![9_i32]);
    state.remove("flags");
    target.triple = [4, 5, 6];
    register_restore(&mut target, Some(&state), None).unwrap();
    assert_eq!(target.triple, [4, 5, 6]);
}

#[derive(AutoSave, Debug, Default)]
struct Indices {
    #[auto_save]
    position: usize,
    #[auto_save]
    offset: isize,
}

#[test]
fn pointer_sized_fields_check_range() {
    let source = Indices {
        position: 12,
        offset: -3,
    };
    let saved = register_save(&source).unwrap();
    assert_eq!(saved.get("position"), Some(&BundleValue::Long(12)));
    assert_eq!(saved.get("offset"), Some(&BundleValue::Long(-3)));

    let mut state = Bundle::new();
    state.put("offset", &i64::MIN);

    let mut target = Indices::default();
    let result = register_restore(&mut target, Some(&state), None);
    if isize::BITS < 64 {
        match result {
            Err(StateError::TypeMismatch(err)) => {
                assert_eq!(err.key, "offset");
                assert!(matches!(err.source, BundleError::OutOfRange { target: "isize", .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    } else {
        assert_eq!(result, Ok(()));
        assert_eq!(target.offset, isize::MIN);
    }
}

#[derive(AutoSave, Debug, Default, PartialEq)]
#[auto_save(all)]
struct Profile {
    name: String,
    age: u32,
    #[auto_save("mail")]
    email: String,
    #[auto_save(skip)]
    dirty: bool,
}

#[test]
fn all_saves_every_field_but_skipped() {
    let info = scan::<Profile>().unwrap();
    assert_eq!(info.keys().collect::<Vec<_>>(), ["name", "age", "mail"]);

    let source = Profile {
        name: "ada".into(),
        age: 36,
        email: "ada@example.com".into(),
        dirty: true,
    };
    let saved = register_save(&source).unwrap();
    assert!(!saved.contains_key("dirty"));

    let mut target = Profile::default();
    register_restore(&mut target, Some(&saved), None).unwrap();
    assert!(!target.dirty);
    target.dirty = true;
    assert_eq!(target, source);
}

#[derive(AutoSave)]
#[auto_save(ignore_invalid_type)]
struct Tolerant {
    #[auto_save]
    ok: i32,
    #[auto_save]
    opaque: Opaque,
    #[auto_save(ignore_invalid_type = false)]
    strict: i32,
}

#[test]
fn type_level_ignore_is_the_field_default() {
    let info = scan::<Tolerant>().unwrap();
    assert!(info.field("ok").unwrap().ignore_invalid_type());
    assert!(info.field("opaque").unwrap().ignore_invalid_type());
    assert!(!info.field("strict").unwrap().ignore_invalid_type());

    let source = Tolerant {
        ok: 1,
        opaque: Opaque,
        strict: 2,
    };
    let saved = register_save(&source).unwrap();
    assert_eq!(saved.keys().collect::<Vec<_>>(), ["ok", "strict"]);

    let mut state = Bundle::new();
    state.put("ok", &String::from("x"));
    state.put("strict", &5_i32);

    let mut target = Tolerant {
        ok: 0,
        opaque: Opaque,
        strict: 0,
    };
    register_restore(&mut target, Some(&state), None).unwrap();
    assert_eq!(target.ok, 0);
    assert_eq!(target.strict, 5);

    state.put("strict", &String::from("y"));
    match register_restore(&mut target, Some(&state), None) {
        Err(StateError::TypeMismatch(err)) => assert_eq!(err.key, "strict"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[cfg(feature = "serde")]
mod serialized {
    use autosave_bundle::{BundleValue, Serialized, ValueKind};
    use serde::{Deserialize, Serialize};

    use crate::derive::AutoSave;
    use crate::{register_restore, register_save};

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
    struct Viewport {
        zoom: f32,
        origin: (i64, i64),
    }

    #[derive(AutoSave, Debug, Default)]
    struct Map {
        #[auto_save]
        viewport: Serialized<Viewport>,
        #[auto_save]
        pinned: Option<Serialized<Viewport>>,
    }

    #[test]
    fn serde_values_round_trip() {
        let view = Viewport {
            zoom: 2.0,
            origin: (-4, 8),
        };
        let source = Map {
            viewport: Serialized(view.clone()),
            pinned: None,
        };
        let saved = register_save(&source).unwrap();
        assert_eq!(
            saved.get("viewport").map(BundleValue::kind),
            Some(ValueKind::Serialized)
        );
        assert!(!saved.contains_key("pinned"));

        let mut target = Map::default();
        register_restore(&mut target, Some(&saved), None).unwrap();
        assert_eq!(*target.viewport, view);
        assert!(target.pinned.is_none());
    }
}

#[test]
fn save_into_keeps_foreign_entries() {
    let registry = CodecRegistry::new();
    let copier = StateCopier::new(&registry);
    let info = scan::<Base>().unwrap();

    let mut out = Bundle::new();
    out.put("host", &true);
    copier.save_into(&Base { a: 2 }, info, &mut out).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out.read::<bool>("host").unwrap(), Some(true));
}

#[test]
fn restore_counts_assigned_fields() {
    let registry = CodecRegistry::new();
    let copier = StateCopier::new(&registry);
    let info = scan::<Counters>().unwrap();

    let mut state = Bundle::new();
    state.put("first", &1_i32);
    state.put("label", &false);

    let mut counters = Counters::default();
    let assigned = copier
        .restore(&mut counters, info, Some(&state), None)
        .unwrap();
    assert_eq!(assigned, 1);
}

#[test]
fn type_erased_components_round_trip() {
    let registry = CodecRegistry::new();
    let copier = StateCopier::new(&registry);

    let components: [Box<dyn DynamicAutoSave>; 2] = [
        Box::new(Base { a: 3 }),
        Box::new(Extended {
            base: Base { a: 4 },
            b: 5,
        }),
    ];
    let saved: Vec<Bundle> = components
        .iter()
        .map(|c| copier.save_object(c.as_ref()).unwrap())
        .collect();
    assert_eq!(saved[0].read::<i32>("a").unwrap(), Some(3));
    assert_eq!(saved[1].len(), 2);

    let mut target: Box<dyn DynamicAutoSave> = Box::new(Extended::default());
    let assigned = copier
        .restore_object(target.as_mut(), Some(&saved[1]), None)
        .unwrap();
    assert_eq!(assigned, 2);

    let target: &dyn core::any::Any = target.as_ref();
    let extended = target.downcast_ref::<Extended>().unwrap();
    assert_eq!(extended.base.a, 4);
    assert_eq!(extended.b, 5);
}
