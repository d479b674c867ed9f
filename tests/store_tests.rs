use rattendance::db::pool::DbPool;
use rattendance::models::address::{RangeExpr, SheetAddress, column_letters};
use rattendance::remote::{MemoryStore, Row, RowStore, SqliteSheetStore};

fn row(values: &[&str]) -> Row {
    values.iter().map(|v| v.to_string()).collect()
}

fn addr(range: &str) -> SheetAddress {
    SheetAddress::parse("roll", range).expect("valid range")
}

fn sqlite_store() -> SqliteSheetStore {
    let pool = DbPool::in_memory().expect("in-memory db");
    SqliteSheetStore::from_pool(pool).expect("migrations")
}

// ---------------------------
// Range expressions
// ---------------------------

#[test]
fn test_range_parse_forms() {
    let cell = RangeExpr::parse("Sheet1!C4").expect("cell");
    assert_eq!(cell, RangeExpr::cell("Sheet1", 3, 4));

    let block = RangeExpr::parse("Sheet1!A1:C6").expect("block");
    assert_eq!(block, RangeExpr::block("Sheet1", 1, 1, 3, 6));

    let cols = RangeExpr::parse("Sheet1!A:C").expect("columns");
    assert_eq!(cols, RangeExpr::columns("Sheet1", 1, 3));

    let sheet = RangeExpr::parse("Sheet1").expect("sheet");
    assert_eq!(sheet, RangeExpr::whole_sheet("Sheet1"));
}

#[test]
fn test_range_display_round_trips_canonical_forms() {
    for expr in ["Sheet1!C4", "Sheet1!A2:C6", "Sheet1!A:C", "Sheet1", "Roll!AA10"] {
        assert_eq!(RangeExpr::parse(expr).expect(expr).to_string(), expr);
    }
}

#[test]
fn test_range_parse_is_case_insensitive_on_columns() {
    assert_eq!(
        RangeExpr::parse("Sheet1!c4").expect("cell"),
        RangeExpr::cell("Sheet1", 3, 4)
    );
}

#[test]
fn test_range_parse_rejects_garbage() {
    for bad in ["", "!A1", "Sheet1!", "Sheet1!4", "Sheet1!A0", "Sheet1!C1:A1", "Sheet1!A5:A2", "Sheet1!A1:C"] {
        assert!(RangeExpr::parse(bad).is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn test_column_letters() {
    assert_eq!(column_letters(1), "A");
    assert_eq!(column_letters(3), "C");
    assert_eq!(column_letters(26), "Z");
    assert_eq!(column_letters(27), "AA");
    assert_eq!(column_letters(52), "AZ");
}

#[test]
fn test_sheet_address_display() {
    assert_eq!(addr("Sheet1!C4").to_string(), "roll/Sheet1!C4");
}

// ---------------------------
// Store semantics, checked on both backends
// ---------------------------

fn check_append_then_get<S: RowStore>(store: &mut S) {
    store
        .update(&addr("Sheet1!A1:C1"), &[row(&["Last Name", "First Name", "Attendance"])])
        .expect("header");
    store
        .append(&addr("Sheet1!A:C"), &[row(&["Rossi", "Anna", "0"]), row(&["Verdi", "Luca", "0"])])
        .expect("append");
    store
        .append(&addr("Sheet1!A:C"), &[row(&["Bianchi", "Sara", "0"])])
        .expect("append more");

    let rows = store.get(&addr("Sheet1!A2:C4")).expect("get");
    assert_eq!(
        rows,
        vec![
            row(&["Rossi", "Anna", "0"]),
            row(&["Verdi", "Luca", "0"]),
            row(&["Bianchi", "Sara", "0"]),
        ]
    );
}

fn check_update_single_cell<S: RowStore>(store: &mut S) {
    store.update(&addr("Sheet1!C3"), &[row(&["5"])]).expect("update");
    assert_eq!(store.get(&addr("Sheet1!C3")).expect("get"), vec![row(&["5"])]);

    store.update(&addr("Sheet1!C3"), &[row(&["6"])]).expect("overwrite");
    assert_eq!(store.get(&addr("Sheet1!C3")).expect("get"), vec![row(&["6"])]);
}

fn check_empty_range_reads_empty<S: RowStore>(store: &mut S) {
    assert!(store.get(&addr("Sheet1!C9")).expect("get").is_empty());
    assert!(store.get(&addr("Other!A:C")).expect("get").is_empty());
}

fn check_update_rejects_overflow<S: RowStore>(store: &mut S) {
    let err = store
        .update(&addr("Sheet1!C2"), &[row(&["1"]), row(&["2"])])
        .expect_err("two rows into one cell");
    assert!(err.to_string().contains("do not fit"));
}

fn check_clear<S: RowStore>(store: &mut S) {
    store
        .update(&addr("Sheet1!A1:D2"), &[row(&["a", "b", "c", "keep"]), row(&["d", "e", "f", "keep"])])
        .expect("seed");
    store.clear(&addr("Sheet1!A:C")).expect("clear");

    assert!(store.get(&addr("Sheet1!A:C")).expect("get").is_empty());
    assert_eq!(
        store.get(&addr("Sheet1!D1:D2")).expect("get"),
        vec![row(&["keep"]), row(&["keep"])]
    );
}

fn check_sheet_ids_are_isolated<S: RowStore>(store: &mut S) {
    let other = SheetAddress::parse("other", "Sheet1!C2").expect("range");
    store.update(&other, &[row(&["9"])]).expect("update");
    assert!(store.get(&addr("Sheet1!C2")).expect("get").is_empty());
}

#[test]
fn test_memory_store_semantics() {
    check_append_then_get(&mut MemoryStore::new());
    check_update_single_cell(&mut MemoryStore::new());
    check_empty_range_reads_empty(&mut MemoryStore::new());
    check_update_rejects_overflow(&mut MemoryStore::new());
    check_clear(&mut MemoryStore::new());
    check_sheet_ids_are_isolated(&mut MemoryStore::new());
}

#[test]
fn test_sqlite_store_semantics() {
    check_append_then_get(&mut sqlite_store());
    check_update_single_cell(&mut sqlite_store());
    check_empty_range_reads_empty(&mut sqlite_store());
    check_update_rejects_overflow(&mut sqlite_store());
    check_clear(&mut sqlite_store());
    check_sheet_ids_are_isolated(&mut sqlite_store());
}

#[test]
fn test_memory_store_counts_requests() {
    let mut store = MemoryStore::new();
    store.get(&addr("Sheet1!C2")).expect("get");
    store.update(&addr("Sheet1!C2"), &[row(&["1"])]).expect("update");
    store.append(&addr("Sheet1!A:C"), &[row(&["x"])]).expect("append");
    store.clear(&addr("Sheet1")).expect("clear");

    let counts = store.requests();
    assert_eq!((counts.gets, counts.updates, counts.appends, counts.clears), (1, 1, 1, 1));
    assert_eq!(counts.total(), 4);
}

#[test]
fn test_memory_store_fault_injection() {
    let mut store = MemoryStore::new();
    store.update(&addr("Sheet1!C2"), &[row(&["3"])]).expect("seed");

    store.fail_reads(true);
    assert!(store.get(&addr("Sheet1!C2")).is_err());

    store.fail_reads(false);
    store.fail_writes(true);
    assert!(store.update(&addr("Sheet1!C2"), &[row(&["4"])]).is_err());
    assert!(store.clear(&addr("Sheet1")).is_err());

    store.fail_writes(false);
    assert_eq!(store.get(&addr("Sheet1!C2")).expect("get"), vec![row(&["3"])]);
}

#[test]
fn test_sqlite_store_migrations_are_idempotent() {
    let pool = DbPool::in_memory().expect("in-memory db");
    rattendance::db::initialize::init_db(&pool.conn).expect("first run");
    rattendance::db::initialize::init_db(&pool.conn).expect("second run");

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .expect("count");
    assert_eq!(applied, 3);
}
