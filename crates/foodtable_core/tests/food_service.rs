use foodtable_core::{
    FoodData, FoodForm, FoodService, FoodServiceError, FoodValidationError, InMemoryRecordStore,
    RecordRepository,
};

fn service_with(rows: usize, page_length: usize) -> FoodService<InMemoryRecordStore<FoodData>> {
    let store = InMemoryRecordStore::with_seed(
        (0..rows).map(|idx| FoodData::new(format!("food {idx}"), 1.0, 1.0, 1.0, 1.0)),
    );
    FoodService::new(store, page_length)
}

#[test]
fn add_food_parses_form_and_returns_new_id() {
    let service = service_with(0, 10);
    let id = service
        .add_food(&FoodForm::new("oats", "389", "16.9", "66.3", "6.9"))
        .unwrap();
    assert_eq!(id, 0);

    let stored = service.food_by_id(id).unwrap();
    assert_eq!(stored.payload, FoodData::new("oats", 389.0, 16.9, 66.3, 6.9));
}

#[test]
fn invalid_forms_never_reach_the_store() {
    let service = service_with(1, 10);

    let err = service
        .add_food(&FoodForm::new("bad", "-1", "0", "0", "0"))
        .unwrap_err();
    assert!(matches!(
        err,
        FoodServiceError::Validation(FoodValidationError::NegativeNutrient { field: "kcal", .. })
    ));

    let err = service
        .update_food(0, &FoodForm::new("bad", "1", "x", "0", "0"))
        .unwrap_err();
    assert!(err.to_string().contains("protein"));

    assert_eq!(service.size(), 1);
    assert_eq!(service.food_by_id(0).unwrap().payload.name, "food 0");
}

#[test]
fn update_and_delete_report_absence_as_false() {
    let service = service_with(2, 10);

    assert!(service
        .update_food(1, &FoodForm::new("renamed", "2", "2", "2", "2"))
        .unwrap());
    assert_eq!(service.food_by_id(1).unwrap().payload.name, "renamed");
    assert!(!service.update_food(9, &FoodForm::default()).unwrap());

    assert!(service.delete_food(0));
    assert!(!service.delete_food(0));
    assert!(service.food_by_id(0).is_none());
}

#[test]
fn browse_clamps_view_index_into_range() {
    let service = service_with(25, 10);

    let first = service.browse(-4);
    assert_eq!(first.view_index, 0);
    assert_eq!(first.view_count, 3);
    assert_eq!(first.items.len(), 10);
    assert!(first.is_first());

    let last = service.browse(99);
    assert_eq!(last.view_index, 2);
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[0].id(), 20);
    assert!(last.is_last());
}

#[test]
fn browse_of_empty_table_has_one_empty_view() {
    let service = service_with(0, 10);
    let page = service.browse(3);
    assert_eq!(page.view_index, 0);
    assert_eq!(page.view_count, 1);
    assert!(page.items.is_empty());
}

#[test]
fn search_pages_over_exact_name_matches() {
    let store = InMemoryRecordStore::new();
    for idx in 0..7 {
        let name = if idx % 2 == 0 { "rice" } else { "beans" };
        store.create(FoodData::new(name, 1.0, 1.0, 1.0, 1.0));
    }
    let service = FoodService::new(store, 3);

    assert_eq!(service.count_by_name("rice"), 4);
    let second = service.search("rice", 1);
    assert_eq!(second.view_count, 2);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].id(), 6);

    let missing = service.search("tofu", 5);
    assert_eq!(missing.view_index, 0);
    assert_eq!(missing.view_count, 1);
    assert!(missing.items.is_empty());
}

#[test]
fn last_view_shows_newly_created_rows() {
    let service = service_with(20, 10);
    let id = service.add_food(&FoodForm::new("new", "1", "1", "1", "1")).unwrap();

    let page = service.last_view();
    assert_eq!(page.view_index, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id(), id);
}

#[test]
fn zero_page_length_is_treated_as_one() {
    let service = service_with(3, 0);
    assert_eq!(service.page_length(), 1);
    assert_eq!(service.browse(1).items[0].id(), 1);
}

#[test]
fn form_round_trips_through_edit_view() {
    let service = service_with(0, 10);
    let id = service
        .add_food(&FoodForm::new("milk", "64", "3.3", "4.8", "3.6"))
        .unwrap();
    let mut form = FoodForm::from_food(&service.food_by_id(id).unwrap().payload);
    assert_eq!(form.kcal, "64");
    assert_eq!(form.fat, "3.6");

    form.reset();
    assert_eq!(form, FoodForm::default());
}

#[test]
fn record_snapshots_serialize_with_flat_fields() {
    let store = InMemoryRecordStore::new();
    store.create(FoodData::new("egg", 155.0, 13.0, 1.1, 11.0));
    let record = store.find_by_id(0).unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], 0);
    assert_eq!(json["name"], "egg");
    assert_eq!(json["kcal"], 155.0);
}
