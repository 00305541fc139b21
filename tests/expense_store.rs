use time::UtcOffset;

use expense_tracker::{
    Category, CategoryFilter, EXPENSES_KEY, ExpenseForm, ExpenseId, ExpenseStore,
    ValidationError, default_expenses,
    storage::{FileStorage, KeyValueStorage, SqliteStorage},
};

#[test]
fn first_run_shows_seed_expenses() {
    let dir = tempfile::tempdir().unwrap();
    let store = ExpenseStore::load(FileStorage::new(dir.path()), UtcOffset::UTC);

    let titles: Vec<&str> = store
        .expenses()
        .iter()
        .map(|expense| expense.title.as_ref())
        .collect();

    assert_eq!(
        titles,
        ["Breakfast at cafe", "Auto to office", "Netflix subscription"]
    );
    assert_eq!(store.total(), 180.0 + 50.0 + 649.0);
}

#[test]
fn adding_coffee_updates_total_and_breakdown() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ExpenseStore::load(FileStorage::new(dir.path()), UtcOffset::UTC);
    let total_before = store.total();
    let food_before = store.category_totals()[&Category::Food];

    store.add("Coffee", "4.50", Category::Food).unwrap();

    assert_eq!(store.total(), total_before + 4.5);
    assert_eq!(store.category_totals()[&Category::Food], food_before + 4.5);
}

#[test]
fn invalid_input_is_rejected_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ExpenseStore::load(FileStorage::new(dir.path()), UtcOffset::UTC);
    let snapshot_before = store.storage().get(EXPENSES_KEY).unwrap();

    assert_eq!(
        store.add("", "10", Category::Food),
        Err(ValidationError::EmptyTitle)
    );
    assert_eq!(
        store.add("Book", "-5", Category::Shopping),
        Err(ValidationError::NonPositiveAmount(-5.0))
    );
    assert_eq!(
        store.add("Book", "five", Category::Shopping),
        Err(ValidationError::InvalidAmount("five".to_owned()))
    );

    assert_eq!(store.len(), 3);
    assert_eq!(store.storage().get(EXPENSES_KEY).unwrap(), snapshot_before);
}

#[test]
fn changes_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("expenses.db");

    let added = {
        let mut store = ExpenseStore::load(SqliteStorage::open(&db_path).unwrap(), UtcOffset::UTC);
        let added = store.add("Pharmacy", "320", Category::Health).unwrap();
        assert!(store.delete(ExpenseId::new(3)));
        added
    };

    let store = ExpenseStore::load(SqliteStorage::open(&db_path).unwrap(), UtcOffset::UTC);

    assert_eq!(store.len(), 3);
    assert_eq!(store.expenses()[0], added);
    assert!(store.get(ExpenseId::new(3)).is_none());
    assert_eq!(store.total(), 180.0 + 50.0 + 320.0);
}

#[test]
fn deleting_every_expense_does_not_bring_back_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ExpenseStore::load(FileStorage::new(dir.path()), UtcOffset::UTC);

    for expense in default_expenses() {
        store.delete(expense.id);
    }
    let reopened = ExpenseStore::load(store.into_storage(), UtcOffset::UTC);

    assert!(reopened.is_empty());
    assert_eq!(reopened.total(), 0.0);
    assert!(reopened.category_totals().is_empty());
}

#[test]
fn legacy_snapshot_is_migrated_on_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage
        .set(
            EXPENSES_KEY,
            r#"[{"id":1,"name":"Breakfast at cafe","amount":180,"category":"Food","date":"2025-10-29"}]"#,
        )
        .unwrap();

    let mut store = ExpenseStore::load(storage, UtcOffset::UTC);
    assert_eq!(store.expenses()[0].title.as_ref(), "Breakfast at cafe");

    store.add("Coffee", "4.50", Category::Food).unwrap();

    let saved = store.storage().get(EXPENSES_KEY).unwrap().unwrap();
    assert!(saved.contains(r#""title":"Breakfast at cafe""#));
    assert!(!saved.contains(r#""name""#));
}

#[test]
fn form_submission_and_filtering() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ExpenseStore::load(FileStorage::new(dir.path()), UtcOffset::UTC);
    let mut form = ExpenseForm::new();

    form.title = "Electricity".to_owned();
    form.amount = "1450".to_owned();
    form.category = Category::Bills;
    form.submit(&mut store).unwrap();
    form.filter = CategoryFilter::Only(Category::Bills);

    let visible = form.visible(&store);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title.as_ref(), "Electricity");
    assert!(form.title.is_empty() && form.amount.is_empty());

    form.filter = CategoryFilter::All;
    assert_eq!(form.visible(&store).len(), 4);
}
