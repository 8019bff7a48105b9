use lx_core::config::SymTableConfig;
use lx_symtab::{SymTable, SymTableError, SymbolIdx, SymbolSubclass};
use pretty_assertions::assert_eq;

fn table(size_prime: u32) -> SymTable {
    let symbols =
        SymTable::new(SymTableConfig::default().with_size_prime(size_prime)).expect("valid config");
    assert_eq!(symbols.config().size_prime, size_prime);
    symbols
}

#[test]
fn interning_is_idempotent() {
    let mut symbols = SymTable::default();
    for text in ["x", "main", ".get", "~push", "a_long_identifier_name", ""] {
        let first = symbols.lookup_add(text).expect("intern");
        let second = symbols.lookup_add(text).expect("intern again");
        assert_eq!(first, second);
        assert_eq!(symbols.lookup(text), first);
        assert_ne!(first, SymbolIdx::NOT_FOUND);
    }
    assert_eq!(symbols.len(), 6);
}

#[test]
fn lookup_does_not_intern() {
    let symbols = SymTable::default();
    assert_eq!(symbols.lookup("ghost"), SymbolIdx::NOT_FOUND);
    assert!(symbols.is_empty());
}

#[test]
fn names_and_subclasses() {
    let mut symbols = SymTable::default();
    let get = symbols.lookup_add(".get").unwrap();
    let push = symbols.lookup_add("~push").unwrap();
    let plain = symbols.lookup_add("value").unwrap();

    assert_eq!(symbols.get_name(get), ".get");
    assert_eq!(symbols.get_subclass(get), SymbolSubclass::DotIdentifier);
    assert_eq!(symbols.get_subclass(push), SymbolSubclass::TildeIdentifier);
    assert_eq!(symbols.get_subclass(plain), SymbolSubclass::Undef);
}

#[test]
fn unknown_indices_get_placeholder_names() {
    let symbols = SymTable::default();
    assert_eq!(symbols.get_name(SymbolIdx(77)), "SYM#77");
    assert_eq!(symbols.get_name(SymbolIdx::NOT_FOUND), "SYM#0");
    // past the end of the slot array
    assert_eq!(symbols.get_name(SymbolIdx(u32::MAX)), format!("SYM#{}", u32::MAX));
    assert_eq!(symbols.get_subclass(SymbolIdx(77)), SymbolSubclass::Undef);
    assert!(!symbols.is_keyword(SymbolIdx(u32::MAX)));
}

#[test]
fn keywords_are_disjoint_from_identifiers() {
    let mut symbols = SymTable::default();
    let ident = symbols.lookup_add("x").unwrap();
    let kw_if = symbols.add_keyword("if").unwrap();
    let kw_else = symbols.add_keyword("else").unwrap();

    assert_ne!(ident, kw_if);
    assert_ne!(kw_if, kw_else);
    assert!(symbols.is_keyword(kw_if));
    assert!(symbols.is_keyword(kw_else));
    assert!(!symbols.is_keyword(ident));
    assert!(!symbols.is_keyword(SymbolIdx::NOT_FOUND));

    assert_eq!(symbols.get_keyword(1), Some(kw_if));
    assert_eq!(symbols.get_keyword(2), Some(kw_else));
    assert_eq!(symbols.get_keyword(3), None);
    assert_eq!(symbols.symbol(kw_if).map(|s| s.idx), Some(-1));
    assert_eq!(symbols.symbol(ident).map(|s| s.idx), Some(ident.0 as i32));

    // keywords intern like any other text
    assert_eq!(symbols.lookup_add("if").unwrap(), kw_if);
}

#[test]
fn keyword_registered_twice_is_an_error() {
    let mut symbols = SymTable::default();
    symbols.add_keyword("while").unwrap();
    assert_eq!(
        symbols.add_keyword("while"),
        Err(SymTableError::KeywordRedefinition {
            keyword: "while".to_string()
        })
    );
    symbols.lookup_add("ident").unwrap();
    assert!(matches!(
        symbols.add_keyword("ident"),
        Err(SymTableError::KeywordRedefinition { .. })
    ));
}

#[test]
fn explicit_keyword_ids() {
    let mut symbols = SymTable::default();
    let ret = symbols.add_keyword_with_id("return", 40).unwrap();
    assert_eq!(symbols.get_keyword(40), Some(ret));
    // automatic ids are counted separately
    let kw = symbols.add_keyword("do").unwrap();
    assert_eq!(symbols.get_keyword(1), Some(kw));
}

#[test]
fn keyword_ids_are_never_shared() {
    let mut symbols = SymTable::default();
    let ret = symbols.add_keyword_with_id("return", 1).unwrap();
    // the automatic counter skips ids handed out explicitly
    let kw_do = symbols.add_keyword("do").unwrap();
    assert_eq!(symbols.get_keyword(1), Some(ret));
    assert_eq!(symbols.get_keyword(2), Some(kw_do));
    assert_eq!(symbols.symbol(kw_do).map(|s| s.idx), Some(-2));

    symbols.add_keyword_with_id("a", 5).unwrap();
    assert_eq!(
        symbols.add_keyword_with_id("b", 5),
        Err(SymTableError::KeywordRedefinition {
            keyword: "b".to_string()
        })
    );
    assert_eq!(symbols.get_name(symbols.get_keyword(5).unwrap()), "a");
    assert_eq!(symbols.lookup("b"), SymbolIdx::NOT_FOUND);
}

#[test]
fn keyword_ids_beyond_index_are_still_unique() {
    let mut symbols =
        SymTable::new(SymTableConfig::default().with_max_keywords(4)).expect("valid config");
    symbols.add_keyword_with_id("far", 9).unwrap();
    assert!(matches!(
        symbols.add_keyword_with_id("farther", 9),
        Err(SymTableError::KeywordRedefinition { .. })
    ));
}

#[test]
fn keyword_ids_must_fit_negative_index() {
    let mut symbols = SymTable::default();
    assert_eq!(
        symbols.add_keyword_with_id("huge", u32::MAX),
        Err(SymTableError::KeywordIdOutOfRange { id: u32::MAX })
    );
    assert_eq!(
        symbols.add_keyword_with_id("edge", 1 << 31),
        Err(SymTableError::KeywordIdOutOfRange { id: 1 << 31 })
    );
    assert_eq!(symbols.lookup("huge"), SymbolIdx::NOT_FOUND);

    let max = symbols.add_keyword_with_id("max", i32::MAX as u32).unwrap();
    assert!(symbols.is_keyword(max));
    assert_eq!(symbols.symbol(max).map(|s| s.idx), Some(-i32::MAX));
    assert_eq!(symbols.len(), 1);
}

#[test]
fn overflow_at_capacity_keeps_existing_symbols() {
    let mut symbols = table(13);
    let capacity = symbols.capacity();
    assert_eq!(capacity, 9);

    let interned: Vec<(String, SymbolIdx)> = (0..capacity)
        .map(|i| {
            let name = format!("v{i}");
            let idx = symbols.lookup_add(&name).expect("below capacity");
            (name, idx)
        })
        .collect();

    assert_eq!(
        symbols.lookup_add("one_too_many"),
        Err(SymTableError::Overflow { defined: capacity })
    );
    assert_eq!(
        symbols.add_keyword("kw"),
        Err(SymTableError::Overflow { defined: capacity })
    );
    assert_eq!(symbols.lookup("one_too_many"), SymbolIdx::NOT_FOUND);

    for (name, idx) in &interned {
        assert_eq!(symbols.lookup(name), *idx);
        assert_eq!(symbols.lookup_add(name), Ok(*idx));
        assert_eq!(&symbols.get_name(*idx), name);
    }
    assert_eq!(symbols.len(), capacity);
}

#[test]
fn many_symbols_in_default_table() {
    let mut symbols = SymTable::default();
    let idxs: Vec<_> = (0..5000)
        .map(|i| symbols.lookup_add(&format!("id_{i}")).unwrap())
        .collect();
    let mut sorted = idxs.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), idxs.len());
    assert!(idxs.iter().all(|idx| idx.is_found()));
}
