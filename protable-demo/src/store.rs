//! In-memory employee table served through a slow, jittery gateway.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use protable_lib::error::FetchError;
use protable_lib::gateway::{FetchGateway, FetchRequest, FetchResult};
use protable_lib::query::{Criteria, Direction, Sorter};
use rand::Rng;

const FIRST_NAMES: &[&str] = &["Ada", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Ken", "Linus"];
const LAST_NAMES: &[&str] = &["Lovelace", "Turing", "Liskov", "Ritchie", "Dijkstra", "Allen", "Thompson"];
const DEPARTMENTS: &[&str] = &["Engineering", "Research", "Operations"];

#[derive(Debug, Clone)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub dept: String,
    pub age: u32,
}

#[derive(Clone)]
pub struct EmployeeStore {
    rows: Arc<Mutex<Vec<Employee>>>,
    next_id: Arc<Mutex<u32>>,
}

impl EmployeeStore {
    pub fn seeded(count: u32) -> Self {
        let rows = (0..count)
            .map(|i| Employee {
                id: i + 1,
                name: format!(
                    "{} {}",
                    FIRST_NAMES[i as usize % FIRST_NAMES.len()],
                    LAST_NAMES[(i as usize / 2) % LAST_NAMES.len()]
                ),
                dept: DEPARTMENTS[(i as usize * 7) % DEPARTMENTS.len()].to_string(),
                age: 22 + (i * 13) % 40,
            })
            .collect();
        Self {
            rows: Arc::new(Mutex::new(rows)),
            next_id: Arc::new(Mutex::new(count + 1)),
        }
    }

    pub fn insert(&self, name: &str, dept: &str, age: u32) {
        let id = {
            let mut next = self.next_id.lock().unwrap_or_else(|p| p.into_inner());
            let id = *next;
            *next += 1;
            id
        };
        self.rows
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Employee {
                id,
                name: name.to_string(),
                dept: dept.to_string(),
                age,
            });
    }

    pub fn remove(&self, id: u32) {
        self.rows
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .retain(|row| row.id != id);
    }

    fn matching(&self, request: &FetchRequest) -> Vec<Employee> {
        let rows = self.rows.lock().unwrap_or_else(|p| p.into_inner());
        let mut matching: Vec<Employee> = rows
            .iter()
            .filter(|row| matches_criteria(row, request.filters.as_ref()))
            .filter(|row| {
                request
                    .column_filters
                    .get("dept")
                    .is_none_or(|allowed| allowed.contains(&row.dept))
            })
            .cloned()
            .collect();
        sort(&mut matching, &request.sorter);
        matching
    }
}

fn matches_criteria(row: &Employee, criteria: Option<&Criteria>) -> bool {
    let Some(criteria) = criteria else {
        return true;
    };
    criteria.iter().all(|(field, value)| {
        let Some(wanted) = value.as_str().filter(|s| !s.is_empty()) else {
            return true;
        };
        match field.as_str() {
            "name" => row.name.to_lowercase().contains(&wanted.to_lowercase()),
            "dept" => row.dept == wanted,
            _ => true,
        }
    })
}

fn sort(rows: &mut [Employee], sorter: &Sorter) {
    rows.sort_by(|a, b| {
        for (field, direction) in sorter.fields() {
            let ordering = match field.as_str() {
                "name" => a.name.cmp(&b.name),
                "dept" => a.dept.cmp(&b.dept),
                "age" => a.age.cmp(&b.age),
                _ => Ordering::Equal,
            };
            let ordering = match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.id.cmp(&b.id)
    });
}

#[async_trait]
impl FetchGateway for EmployeeStore {
    type Row = Employee;

    async fn fetch(&self, request: FetchRequest) -> Result<FetchResult<Employee>, FetchError> {
        let latency = rand::rng().random_range(20..300);
        tokio::time::sleep(Duration::from_millis(latency)).await;

        let matching = self.matching(&request);
        let total = matching.len() as u64;
        let page = request.pagination;
        let data = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size() as usize)
            .collect();
        log::debug!(
            "Served page {} ({} of {} rows) after {} ms",
            page.page(),
            page.page_size(),
            total,
            latency
        );
        Ok(FetchResult::new(total, data))
    }
}
