//! Service-level tests for MIT creation rules and query policy.

use std::sync::Arc;

use crate::mit::{
    adapters::memory::InMemoryMitRepository,
    domain::{Mit, MitChanges, MitDate, MitDomainError, MitId, NewMit},
    ports::{MitQuery, MitRepository, MitRepositoryError, MitRepositoryResult},
    services::{CreateMitRequest, MitFilter, MitService, MitServiceError},
};
use chrono::Days;
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

type TestService = MitService<InMemoryMitRepository<DefaultClock>, DefaultClock>;

#[fixture]
fn service() -> TestService {
    MitService::new(
        Arc::new(InMemoryMitRepository::new(Arc::new(DefaultClock))),
        Arc::new(DefaultClock),
    )
}

fn today() -> MitDate {
    MitDate::today(&DefaultClock)
}

fn days_ahead(days: u64) -> MitDate {
    let shifted = DefaultClock
        .local()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date within range");
    MitDate::from_naive(shifted)
}

fn yesterday() -> MitDate {
    let shifted = DefaultClock
        .local()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .expect("date within range");
    MitDate::from_naive(shifted)
}

fn date_and_order(mits: &[Mit]) -> Vec<(String, i32)> {
    mits.iter()
        .map(|mit| (mit.date().to_string(), mit.order()))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_past_dates_without_inserting(service: TestService) {
    let result = service
        .create(CreateMitRequest::new("Backfill the journal", yesterday()))
        .await;

    assert!(matches!(
        result,
        Err(MitServiceError::Domain(MitDomainError::PastDate { .. }))
    ));
    let stored = service
        .find_by_date(yesterday())
        .await
        .expect("lookup should succeed");
    assert!(stored.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_accepts_todays_date(service: TestService) {
    let created = service
        .create(CreateMitRequest::new("Plan the day", today()))
        .await
        .expect("creation on today should succeed");

    assert_eq!(created.date(), today());
    assert!(!created.completed());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_passes_an_empty_description_through(service: TestService) {
    // Emptiness is the transport schema's concern; the service stores what
    // it is handed rather than failing.
    let created = service
        .create(CreateMitRequest::new("", days_ahead(1)))
        .await
        .expect("creation should succeed");

    assert_eq!(created.description(), "");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_enforces_daily_limit_and_names_it(service: TestService) {
    let date = days_ahead(1);
    for description in ["First", "Second", "Third"] {
        service
            .create(CreateMitRequest::new(description, date))
            .await
            .expect("creation below the cap should succeed");
    }

    let result = service.create(CreateMitRequest::new("Fourth", date)).await;

    let Err(MitServiceError::Domain(err)) = result else {
        panic!("expected a domain error");
    };
    assert_eq!(
        err,
        MitDomainError::DailyLimitReached { limit: 3, date }
    );
    assert_eq!(
        err.to_string(),
        format!("daily limit of 3 MITs reached for {date}")
    );

    let stored = service
        .find_by_date(date)
        .await
        .expect("lookup should succeed");
    assert_eq!(stored.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_respects_configured_daily_limit(service: TestService) {
    let capped = service.with_daily_limit(1);
    let date = days_ahead(1);
    capped
        .create(CreateMitRequest::new("Only one", date))
        .await
        .expect("first creation should succeed");

    let result = capped.create(CreateMitRequest::new("One too many", date)).await;

    assert!(matches!(
        result,
        Err(MitServiceError::Domain(MitDomainError::DailyLimitReached {
            limit: 1,
            ..
        }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_order_one_on_an_empty_partition(service: TestService) {
    let created = service
        .create(CreateMitRequest::new("Open the partition", days_ahead(1)))
        .await
        .expect("creation should succeed");

    assert_eq!(created.order(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_one_above_the_highest_existing_order(service: TestService) {
    let date = days_ahead(1);
    service
        .create(CreateMitRequest::new("First", date).with_order(1))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Gapped", date).with_order(3))
        .await
        .expect("creation should succeed");

    let created = service
        .create(CreateMitRequest::new("Sequential", date))
        .await
        .expect("creation should succeed");

    assert_eq!(created.order(), 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_uses_an_explicit_order_without_rechecking(service: TestService) {
    let date = days_ahead(1);
    let first = service
        .create(CreateMitRequest::new("Claimed slot", date).with_order(5))
        .await
        .expect("creation should succeed");
    let second = service
        .create(CreateMitRequest::new("Duplicate slot", date).with_order(5))
        .await
        .expect("duplicate orders are not rejected");

    assert_eq!(first.order(), 5);
    assert_eq!(second.order(), 5);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_defaults_to_exactly_today(service: TestService) {
    service
        .create(CreateMitRequest::new("Today second", today()).with_order(2))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Today first", today()).with_order(1))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Tomorrow", days_ahead(1)))
        .await
        .expect("creation should succeed");

    let found = service
        .find(MitFilter::new())
        .await
        .expect("query should succeed");

    assert_eq!(
        date_and_order(&found),
        vec![(today().to_string(), 1), (today().to_string(), 2)]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_with_closed_range_orders_date_desc_then_order_asc(service: TestService) {
    let near = days_ahead(1);
    let far = days_ahead(3);
    service
        .create(CreateMitRequest::new("Near second", near).with_order(2))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Near first", near).with_order(1))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Far", far).with_order(1))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Outside", days_ahead(5)))
        .await
        .expect("creation should succeed");

    let found = service
        .find(MitFilter::new().with_start_date(near).with_end_date(far))
        .await
        .expect("query should succeed");

    assert_eq!(
        date_and_order(&found),
        vec![
            (far.to_string(), 1),
            (near.to_string(), 1),
            (near.to_string(), 2),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_with_start_bound_only_returns_later_dates(service: TestService) {
    service
        .create(CreateMitRequest::new("Early", days_ahead(1)))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Late", days_ahead(4)))
        .await
        .expect("creation should succeed");

    let found = service
        .find(MitFilter::new().with_start_date(days_ahead(2)))
        .await
        .expect("query should succeed");

    assert_eq!(date_and_order(&found), vec![(days_ahead(4).to_string(), 1)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_with_end_bound_only_returns_earlier_dates(service: TestService) {
    service
        .create(CreateMitRequest::new("Early", days_ahead(1)))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Late", days_ahead(4)))
        .await
        .expect("creation should succeed");

    let found = service
        .find(MitFilter::new().with_end_date(days_ahead(2)))
        .await
        .expect("query should succeed");

    assert_eq!(date_and_order(&found), vec![(days_ahead(1).to_string(), 1)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_combines_completion_filter_with_date_range(service: TestService) {
    let date = days_ahead(1);
    let done = service
        .create(CreateMitRequest::new("Done", date))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Open", date))
        .await
        .expect("creation should succeed");
    service
        .update(done.id(), MitChanges::new().with_completed(true))
        .await
        .expect("update should succeed");

    let found = service
        .find(
            MitFilter::new()
                .with_start_date(date)
                .with_end_date(date)
                .with_completed(false),
        )
        .await
        .expect("query should succeed");

    let descriptions: Vec<&str> = found.iter().map(Mit::description).collect();
    assert_eq!(descriptions, vec!["Open"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_honors_the_row_limit(service: TestService) {
    let date = days_ahead(1);
    service
        .create(CreateMitRequest::new("First", date))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Second", date))
        .await
        .expect("creation should succeed");

    let found = service
        .find(
            MitFilter::new()
                .with_start_date(date)
                .with_end_date(date)
                .with_limit(1),
        )
        .await
        .expect("query should succeed");

    assert_eq!(found.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_clamps_out_of_range_limits(service: TestService) {
    let date = days_ahead(1);
    service
        .create(CreateMitRequest::new("First", date))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Second", date))
        .await
        .expect("creation should succeed");

    let floored = service
        .find(
            MitFilter::new()
                .with_start_date(date)
                .with_end_date(date)
                .with_limit(0),
        )
        .await
        .expect("query should succeed");
    assert_eq!(floored.len(), 1);

    let capped = service
        .find(
            MitFilter::new()
                .with_start_date(date)
                .with_end_date(date)
                .with_limit(1_000_000),
        )
        .await
        .expect("query should succeed");
    assert_eq!(capped.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_sets_completed_and_refreshes_the_timestamp(service: TestService) {
    let created = service
        .create(CreateMitRequest::new("Finish the draft", days_ahead(1)))
        .await
        .expect("creation should succeed");

    let updated = service
        .update(created.id(), MitChanges::new().with_completed(true))
        .await
        .expect("update should succeed")
        .expect("record should exist");

    assert!(updated.completed());
    assert_eq!(updated.description(), "Finish the draft");
    assert_eq!(updated.created_at(), created.created_at());
    assert_ne!(updated.updated_at(), created.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_returns_none_for_an_unknown_id(service: TestService) {
    let missing = service
        .update(MitId::new(), MitChanges::new().with_completed(true))
        .await
        .expect("update should succeed");

    assert_eq!(missing, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_moves_date_to_the_past_without_revalidation(service: TestService) {
    let created = service
        .create(CreateMitRequest::new("Slipped task", days_ahead(1)))
        .await
        .expect("creation should succeed");

    let updated = service
        .update(created.id(), MitChanges::new().with_date(yesterday()))
        .await
        .expect("update should succeed")
        .expect("record should exist");

    assert_eq!(updated.date(), yesterday());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_the_record_exactly_once(service: TestService) {
    let created = service
        .create(CreateMitRequest::new("Ephemeral", days_ahead(1)))
        .await
        .expect("creation should succeed");

    let removed = service
        .delete(created.id())
        .await
        .expect("delete should succeed");
    assert_eq!(removed.map(|mit| mit.id()), Some(created.id()));

    let second = service
        .delete(created.id())
        .await
        .expect("delete should succeed");
    assert_eq!(second, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_orders_by_order_across_dates(service: TestService) {
    service
        .create(CreateMitRequest::new("Near", days_ahead(1)).with_order(2))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Far", days_ahead(3)).with_order(1))
        .await
        .expect("creation should succeed");

    let all = service.find_all().await.expect("query should succeed");

    let orders: Vec<i32> = all.iter().map(Mit::order).collect();
    assert_eq!(orders, vec![1, 2]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_date_returns_only_that_partition_in_order(service: TestService) {
    let date = days_ahead(1);
    service
        .create(CreateMitRequest::new("Second", date).with_order(2))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("First", date).with_order(1))
        .await
        .expect("creation should succeed");
    service
        .create(CreateMitRequest::new("Elsewhere", days_ahead(2)))
        .await
        .expect("creation should succeed");

    let found = service
        .find_by_date(date)
        .await
        .expect("query should succeed");

    let descriptions: Vec<&str> = found.iter().map(Mit::description).collect();
    assert_eq!(descriptions, vec!["First", "Second"]);
}

mockall::mock! {
    Repo {}

    #[async_trait::async_trait]
    impl MitRepository for Repo {
        async fn insert(&self, draft: NewMit) -> MitRepositoryResult<Mit>;
        async fn list_all(&self) -> MitRepositoryResult<Vec<Mit>>;
        async fn list_for_date(&self, date: MitDate) -> MitRepositoryResult<Vec<Mit>>;
        async fn query(&self, query: MitQuery) -> MitRepositoryResult<Vec<Mit>>;
        async fn update(&self, id: MitId, changes: MitChanges) -> MitRepositoryResult<Option<Mit>>;
        async fn delete(&self, id: MitId) -> MitRepositoryResult<Option<Mit>>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_propagates_storage_errors_unchanged() {
    let mut repository = MockRepo::new();
    repository
        .expect_list_for_date()
        .returning(|_| Ok(Vec::new()));
    repository
        .expect_insert()
        .returning(|_| Err(MitRepositoryError::persistence(std::io::Error::other("disk full"))));

    let failing = MitService::new(Arc::new(repository), Arc::new(DefaultClock));
    let result = failing
        .create(CreateMitRequest::new("Doomed", days_ahead(1)))
        .await;

    assert!(matches!(
        result,
        Err(MitServiceError::Repository(MitRepositoryError::Persistence(_)))
    ));
}
