// tests/flags_text.rs

use fswire::codec::{Encode, Value, decode_exact};
use fswire::errors::FswireError;
use fswire::flags::{CreateFlags, EventFlags, FlagFamily, NAMES_KEY, RAW_KEY, parse_raw_bits};
use fswire::types::FlagKind;
use fswire_test_utils::init_tracing;

#[test]
fn test_format_lists_names_in_table_order() {
    let flags = EventFlags::ItemIsFile | EventFlags::ItemCreated;
    assert_eq!(flags.format(), "[ItemCreated,ItemIsFile]");
    assert_eq!(flags.to_string(), "[ItemCreated,ItemIsFile]");
}

#[test]
fn test_empty_set_formats_as_empty_brackets() {
    assert_eq!(EventFlags::empty().format(), "[]");
    assert_eq!(CreateFlags::from_raw(0).format(), "[]");
    assert_eq!(EventFlags::parse("[]").unwrap(), EventFlags::empty());
}

#[test]
fn test_parse_known_names() {
    let flags = EventFlags::parse("[ItemRenamed,ItemIsDir]").unwrap();
    assert_eq!(flags, EventFlags::ItemRenamed | EventFlags::ItemIsDir);

    let create: CreateFlags = "[FileEvents,NoDefer]".parse().unwrap();
    assert_eq!(create.bits(), 0x12);
}

#[test]
fn test_parse_rejects_unbracketed_text() {
    for text in ["", "[", "]", "ItemCreated", "ItemCreated]", "[ItemCreated"] {
        match EventFlags::parse(text) {
            Err(FswireError::MalformedFlagText(got)) => assert_eq!(got, text),
            other => panic!("{text:?} should be malformed, got {other:?}"),
        }
    }
}

#[test]
fn test_parse_ignores_unknown_names() {
    init_tracing();
    let flags = EventFlags::parse("[ItemCreated,NotAFlag,ItemIsFile]").unwrap();
    assert_eq!(flags, EventFlags::ItemCreated | EventFlags::ItemIsFile);

    // Names are matched exactly.
    assert_eq!(EventFlags::parse("[ItemCreated, ItemIsFile]").unwrap(), EventFlags::ItemCreated);
    assert_eq!(EventFlags::parse("[itemcreated]").unwrap(), EventFlags::empty());
}

#[test]
fn test_unknown_bits_are_kept_but_not_named() {
    let flags = EventFlags::from_raw(0x8000_0100);
    assert_eq!(flags.bits(), 0x8000_0100);
    assert_eq!(flags.unknown_bits(), 0x8000_0000);
    assert_eq!(flags.format(), "[ItemCreated]");
    assert_eq!(flags.encode(), b"44{5,cflag10#21474839045,named14[11,ItemCreated");
}

#[test]
fn test_flag_wire_form() {
    assert_eq!(EventFlags::empty().encode(), b"19{5,cflag1#05,named0[");
    assert_eq!(
        CreateFlags::defaults().encode(),
        b"68{5,cflag2#535,named47[10,UseCFTypes9,WatchRoot10,FileEvents8,MarkSelf"
    );

    let decoded = decode_exact(&(EventFlags::ItemModified | EventFlags::ItemIsSymlink).encode())
        .unwrap();
    assert_eq!(decoded.get(RAW_KEY), Some(&Value::Integer(0x4_1000)));
    assert_eq!(
        decoded.get(NAMES_KEY),
        Some(&Value::Array(vec!["ItemModified".into(), "ItemIsSymlink".into()]))
    );
}

#[test]
fn test_rescan_flags() {
    assert!(EventFlags::MustScanSubDirs.needs_rescan());
    assert!((EventFlags::KernelDropped | EventFlags::ItemIsDir).needs_rescan());
    assert!(EventFlags::RootChanged.needs_rescan());
    assert!(!(EventFlags::ItemCreated | EventFlags::ItemIsFile).needs_rescan());
    assert!(!EventFlags::HistoryDone.needs_rescan());
}

#[test]
fn test_tables_are_complete() {
    assert_eq!(FlagKind::Create.table().len(), 7);
    assert_eq!(FlagKind::Event.table().len(), 23);
    assert_eq!(FlagKind::Event.table()[0], ("MustScanSubDirs", 0x1));
    assert_eq!(FlagKind::Event.table()[22], ("ItemCloned", 0x40_0000));
    assert!(
        FlagKind::Event
            .table()
            .iter()
            .any(|&(name, bit)| name == "InodeMetaMod" && bit == 0x400)
    );
}

#[test]
fn test_flag_kind_dispatch() {
    assert_eq!(FlagKind::Event.format_bits(0x20), "[RootChanged]");
    assert_eq!(FlagKind::Create.format_bits(0x20), "[MarkSelf]");
    assert_eq!(FlagKind::Create.parse_text("[IgnoreSelf]").unwrap(), 0x8);
    assert_eq!(
        FlagKind::Event.encode_bits(0),
        EventFlags::empty().encode()
    );
}

#[test]
fn test_parse_raw_bits() {
    assert_eq!(parse_raw_bits("256").unwrap(), 256);
    assert_eq!(parse_raw_bits("0x100").unwrap(), 256);
    assert_eq!(parse_raw_bits(" 0X10 ").unwrap(), 16);
    assert!(matches!(
        parse_raw_bits("0xzz"),
        Err(FswireError::InvalidArgument(_))
    ));
    assert!(matches!(
        parse_raw_bits("-1"),
        Err(FswireError::InvalidArgument(_))
    ));
}
