use std::sync::Arc;
use std::time::Duration;

use learn_core::Catalog;
use learn_core::model::{CourseId, Credentials, NavigationTarget, Screen, Session};
use services::{AppServices, Command, DashboardSummary, SimulatorConfig};
use storage::{InMemoryRepository, KeyValueRepository, PROGRESS_NAMESPACE, Storage};

fn id(raw: &str) -> CourseId {
    CourseId::new(raw).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn shared_storage() -> (Storage, Arc<InMemoryRepository>) {
    let repo = Arc::new(InMemoryRepository::new());
    let records: Arc<dyn KeyValueRepository> = repo.clone();
    (Storage { records }, repo)
}

#[tokio::test(start_paused = true)]
async fn watch_course_then_go_back() {
    let (storage, _repo) = shared_storage();
    let services =
        AppServices::from_storage(&storage, Catalog::sample(), SimulatorConfig::default()).await;
    let mut state = services.app_state();

    state
        .dispatch(Command::Login(Credentials::new("a@x.com", "p")))
        .await
        .unwrap();
    assert_eq!(state.session(), Session::Authenticated);
    assert_eq!(state.navigation().target(), NavigationTarget::Home);

    let c2 = state.catalog().get(&id("c2")).cloned().unwrap();
    state.dispatch(Command::OpenCourse(c2)).await.unwrap();
    assert_eq!(
        state.navigation().target(),
        NavigationTarget::CourseDetail(id("c2"))
    );
    assert_eq!(state.ledger().get(&id("c2")).await.value(), 0.0);

    tokio::time::sleep(Duration::from_millis(50_500)).await;
    assert_close(state.ledger().get(&id("c2")).await.value(), 5.0);

    state.dispatch(Command::Back).await.unwrap();
    assert_eq!(state.navigation().target(), NavigationTarget::Home);
    assert!(state.navigation().simulator().is_none());

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_close(state.ledger().get(&id("c2")).await.value(), 5.0);
}

#[tokio::test(start_paused = true)]
async fn progress_survives_a_restart() {
    let (storage, repo) = shared_storage();
    {
        let services =
            AppServices::from_storage(&storage, Catalog::sample(), SimulatorConfig::default())
                .await;
        let mut state = services.app_state();
        state
            .dispatch(Command::Login(Credentials::new("a@x.com", "p")))
            .await
            .unwrap();
        let c1 = state.catalog().get(&id("c1")).cloned().unwrap();
        state.dispatch(Command::OpenCourse(c1)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        state.shutdown().await;
    }

    let raw = repo.get_record(PROGRESS_NAMESPACE).await.unwrap().unwrap();
    assert!(raw.starts_with(r#"{"c1":0.30000000000000004"#), "{raw}");

    let services =
        AppServices::from_storage(&storage, Catalog::sample(), SimulatorConfig::default()).await;
    assert_close(services.ledger().get(&id("c1")).await.value(), 0.3);
}

#[tokio::test(start_paused = true)]
async fn reopening_resumes_from_stored_value() {
    let services = AppServices::in_memory(Catalog::sample(), SimulatorConfig::default()).await;
    services.ledger().update(&id("c3"), 20.0).await;
    let mut state = services.app_state();
    state
        .dispatch(Command::Login(Credentials::new("a@x.com", "p")))
        .await
        .unwrap();

    let c3 = state.catalog().get(&id("c3")).cloned().unwrap();
    state.dispatch(Command::OpenCourse(c3.clone())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10_500)).await;
    state.dispatch(Command::Back).await.unwrap();

    state.dispatch(Command::OpenCourse(c3)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10_500)).await;
    state.dispatch(Command::Back).await.unwrap();

    assert_close(state.ledger().get(&id("c3")).await.value(), 22.0);
}

#[tokio::test(start_paused = true)]
async fn logout_mid_course_stops_ticking() {
    let services = AppServices::in_memory(Catalog::sample(), SimulatorConfig::default()).await;
    let mut state = services.app_state();
    state
        .dispatch(Command::Login(Credentials::new("a@x.com", "p")))
        .await
        .unwrap();
    let c1 = state.catalog().get(&id("c1")).cloned().unwrap();
    state.dispatch(Command::OpenCourse(c1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    state.dispatch(Command::Logout).await.unwrap();
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.session, Session::Anonymous);
    assert_eq!(snapshot.navigation, NavigationTarget::Home);
    assert!(state.navigation().simulator().is_none());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_close(state.ledger().get(&id("c1")).await.value(), 0.2);
}

#[tokio::test(start_paused = true)]
async fn completing_a_course_shows_on_dashboard() {
    let services = AppServices::in_memory(Catalog::sample(), SimulatorConfig::default()).await;
    let mut state = services.app_state();
    state
        .dispatch(Command::Login(Credentials::new("a@x.com", "p")))
        .await
        .unwrap();

    let c1 = state.catalog().get(&id("c1")).cloned().unwrap();
    state.dispatch(Command::OpenCourse(c1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    state.dispatch(Command::MarkCompleted).await.unwrap();
    state.dispatch(Command::GoTo(Screen::Dashboard)).await.unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.navigation, NavigationTarget::Dashboard);
    let summary = DashboardSummary::build(state.catalog(), &snapshot.progress);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.overall_percent, 33);
}
