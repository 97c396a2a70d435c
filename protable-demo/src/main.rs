//! Scripted walk-through of the table controller against an in-memory store.
//!
//! Every fetch sleeps for a random latency, so overlapping fetches resolve
//! out of order and the controller has to drop the stale ones.

mod store;

use std::fs::File;
use std::time::Duration;

use protable_lib::model::Value;
use protable_lib::panel::{FilterField, FilterPanelConfig};
use protable_lib::query::{ColumnFilters, DisplayThreshold, PageInfo, Sorter};
use protable_lib::wakeup::WakeupReceiver;
use protable_lib::{ControllerConfig, DataTableController};
use simplelog::{Config, LevelFilter, WriteLogger};

use store::{Employee, EmployeeStore};

type Controller = DataTableController<EmployeeStore>;

#[tokio::main]
async fn main() {
    let log_file = File::create("protable-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let store = EmployeeStore::seeded(42);
    let config = ControllerConfig::default()
        .with_page_size(8)
        .with_display_threshold(DisplayThreshold::Above(8))
        .with_filter_panel(FilterPanelConfig::new(vec![
            FilterField::new("name", "Name"),
            FilterField::new("dept", "Department"),
        ]))
        .on_error(|err| eprintln!("! fetch failed: {}", err));

    let controller = DataTableController::mount(store.clone(), config);
    let mut changes = controller.subscribe();

    settle(&controller, &mut changes).await;
    print_table("Mounted", &controller);

    // Two quick page jumps: only the second one may land.
    controller.refresh(Some(PageInfo::new(2, 8))).ok();
    controller.refresh(Some(PageInfo::new(4, 8))).ok();
    settle(&controller, &mut changes).await;
    print_table("Jumped to page 4", &controller);

    if let Some(filters) = controller.filter_handle() {
        filters.set_value("dept", Value::from("Engineering"));
    }
    controller.submit_filters().ok();
    settle(&controller, &mut changes).await;
    print_table("Searched dept = Engineering", &controller);

    controller
        .change_view(PageInfo::new(1, 8), ColumnFilters::new(), Sorter::desc("age"))
        .ok();
    settle(&controller, &mut changes).await;
    print_table("Sorted by age, descending", &controller);

    controller.reset_filters().ok();
    settle(&controller, &mut changes).await;

    // Delete the only row on the trailing page from "another screen".
    let handle = controller.action_handle();
    let last_page = controller
        .pagination_config()
        .map(|p| p.page_count())
        .unwrap_or(1);
    handle.refresh(Some(PageInfo::new(last_page, 8))).ok();
    settle(&controller, &mut changes).await;
    print_table("Last page", &controller);

    if let Some(row) = controller.snapshot().rows().last() {
        store.remove(row.id);
        handle.del_refresh().ok();
        settle(&controller, &mut changes).await;
        print_table("After deleting a row", &controller);
    }

    store.insert("Grace Hopper", "Engineering", 85);
    handle.add_refresh().ok();
    settle(&controller, &mut changes).await;
    print_table("After adding a row", &controller);

    controller.teardown();
    println!(
        "Torn down; handle attached: {}, refresh -> {:?}",
        handle.is_attached(),
        handle.refresh(None)
    );
}

/// Waits until the latest fetch has resolved.
async fn settle(controller: &Controller, changes: &mut WakeupReceiver) {
    while controller.snapshot().is_loading() {
        match tokio::time::timeout(Duration::from_secs(2), changes.changed()).await {
            Ok(Some(())) => {}
            Ok(None) | Err(_) => break,
        }
    }
}

fn print_table(title: &str, controller: &Controller) {
    let props = controller.table_view_props();
    println!("== {}", title);
    if let Some(filters) = controller.filters_snapshot() {
        let applied: Vec<String> = filters
            .iter()
            .filter(|(_, v)| !v.is_blank())
            .map(|(k, v)| format!("{}={}", k, serde_json::to_string(v).unwrap_or_default()))
            .collect();
        if !applied.is_empty() {
            println!("   filters: {}", applied.join(", "));
        }
    }
    for row in &props.rows {
        print_row(row);
    }
    match props.pagination {
        Some(p) => println!(
            "   page {}/{} ({} rows, {} per page)",
            p.page,
            p.page_count(),
            p.total,
            p.page_size
        ),
        None => println!("   ({} rows, no pagination)", controller.snapshot().total()),
    }
    println!();
}

fn print_row(row: &Employee) {
    println!(
        "   #{:03}  {:<20} {:<12} {:>3}",
        row.id, row.name, row.dept, row.age
    );
}
