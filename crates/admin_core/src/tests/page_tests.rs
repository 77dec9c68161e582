use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use shared::error::{ErrorCode, RemoteError};
use tokio::sync::Mutex;

use super::*;
use crate::{
    collection::search_fields,
    form::SubmitOutcome,
    notify::{NotificationKind, NotificationSink},
    remote::MissingGateway,
    validation::ValidationSchema,
};

#[derive(Debug, Clone, PartialEq)]
struct Vehicle {
    id: i64,
    plate: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct VehicleDraft {
    plate: String,
}

struct VehicleGateway {
    rows: Mutex<Vec<Vehicle>>,
    fetch_calls: AtomicUsize,
    updates: Mutex<Vec<(i64, VehicleDraft)>>,
}

impl VehicleGateway {
    fn seeded(rows: Vec<Vehicle>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            fetch_calls: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl EntityGateway for VehicleGateway {
    type Entity = Vehicle;
    type Draft = VehicleDraft;
    type Id = i64;

    async fn fetch_all(&self) -> Result<Vec<Vehicle>, RemoteError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().await.clone())
    }

    async fn create(&self, draft: VehicleDraft) -> Result<Vehicle, RemoteError> {
        let mut rows = self.rows.lock().await;
        let vehicle = Vehicle {
            id: rows.len() as i64 + 1,
            plate: draft.plate,
        };
        rows.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, id: i64, draft: VehicleDraft) -> Result<Vehicle, RemoteError> {
        self.updates.lock().await.push((id, draft.clone()));
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| RemoteError::new(ErrorCode::NotFound, format!("vehicle {id}")))?;
        row.plate = draft.plate;
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        self.rows.lock().await.retain(|row| row.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    events: std::sync::Mutex<Vec<(String, NotificationKind)>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<(String, NotificationKind)> {
        self.events.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.events.lock().unwrap().push((message.to_string(), kind));
    }
}

fn plate_schema() -> ValidationSchema<VehicleDraft> {
    ValidationSchema::new().rule("plate", |draft: &VehicleDraft| {
        draft.plate.is_empty().then(|| "plate is required".to_string())
    })
}

fn vehicle_page(
    gateway: Arc<VehicleGateway>,
    notifier: Arc<RecordingNotifier>,
) -> EntityPage<VehicleGateway> {
    EntityPage::new(
        "vehicle",
        gateway,
        10,
        search_fields(vec![Box::new(|row: &Vehicle| row.plate.clone())]),
        notifier,
    )
}

#[tokio::test]
async fn create_flow_validates_then_writes_and_refreshes() {
    let gateway = VehicleGateway::seeded(Vec::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let page = vehicle_page(Arc::clone(&gateway), Arc::clone(&notifier));
    page.collection().lock().await.load().await;
    assert_eq!(gateway.fetch_calls.load(Ordering::SeqCst), 1);

    let mut form = page.create_form(VehicleDraft::default(), plate_schema());

    // Empty plate: rejected locally, remote untouched.
    assert_eq!(form.submit().await, SubmitOutcome::Rejected);
    assert_eq!(form.field_error("plate"), Some("plate is required"));
    assert_eq!(gateway.fetch_calls.load(Ordering::SeqCst), 1);
    assert!(notifier.events().is_empty());

    form.set_field("plate", |draft| draft.plate = "KDA 123X".to_string());
    assert_eq!(form.submit().await, SubmitOutcome::Completed);

    let collection = page.collection().lock().await;
    assert_eq!(collection.all().len(), 1);
    assert_eq!(collection.page()[0].plate, "KDA 123X");
    assert_eq!(
        notifier.events(),
        vec![("vehicle created".to_string(), NotificationKind::Success)]
    );
}

#[tokio::test]
async fn edit_form_updates_the_bound_row() {
    let gateway = VehicleGateway::seeded(vec![Vehicle {
        id: 7,
        plate: "KBB 001A".to_string(),
    }]);
    let notifier = Arc::new(RecordingNotifier::default());
    let page = vehicle_page(Arc::clone(&gateway), notifier);
    page.collection().lock().await.load().await;

    let mut form = page.edit_form(
        7,
        VehicleDraft {
            plate: "KBB 001A".to_string(),
        },
        plate_schema(),
    );
    form.set_field("plate", |draft| draft.plate = "KBB 002B".to_string());
    assert_eq!(form.submit().await, SubmitOutcome::Completed);

    let updates = gateway.updates.lock().await;
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, 7);
    assert_eq!(updates[0].1.plate, "KBB 002B");
    assert_eq!(
        page.collection().lock().await.page()[0].plate,
        "KBB 002B"
    );
}

#[tokio::test]
async fn missing_gateway_surfaces_read_error_not_panic() {
    let gateway: Arc<MissingGateway<Vehicle, VehicleDraft, i64>> =
        Arc::new(MissingGateway::new());
    let page = EntityPage::new(
        "vehicle",
        gateway,
        10,
        search_fields(vec![Box::new(|row: &Vehicle| row.plate.clone())]),
        Arc::new(RecordingNotifier::default()),
    );

    let mut collection = page.collection().lock().await;
    collection.load().await;

    assert!(collection.all().is_empty());
    assert_eq!(
        collection.error().expect("read error").code,
        ErrorCode::Unavailable
    );
}
