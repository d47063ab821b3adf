//! Integration tests for the planning lifecycle.
//!
//! These tests run the full flow against the in-memory adapters:
//! 1. Seed baseline rows from prior-year actuals with an uplift
//! 2. Edit rows with distribution and ratio scaling
//! 3. Add new units, with conflict rejection
//! 4. Confirm the customer and check the aggregate views

use std::sync::Arc;

use sales_planner::adapters::memory::{
    InMemoryAvgPriceSource, InMemoryInvoiceHistoryReader, InMemoryPlanRemarkRepository,
    InMemoryPlanRowRepository,
};
use sales_planner::application::handlers::plan::{
    AddPlanUnitsCommand, AddPlanUnitsError, AddPlanUnitsHandler, BulkRatioCommand,
    BulkRatioHandler, ConfirmCustomerCommand, ConfirmCustomerError, ConfirmCustomerHandler,
    GetPlanRemarkHandler, GetPlanRemarkQuery, InitBaselineCommand, InitBaselineError,
    InitBaselineHandler, NewUnitItem, QtyInput, SavePlanRemarkCommand, SavePlanRemarkHandler,
    UpsertPlanRowCommand, UpsertPlanRowError, UpsertPlanRowHandler,
};
use sales_planner::application::price_resolver::UnitPriceResolver;
use sales_planner::domain::foundation::{
    AssigneeId, CompanyType, CustomerId, PlanYear, RatioPercent, UpliftPercent,
};
use sales_planner::domain::plan::{
    customer_status_counts, totals_by_company, MonthlyQty, PlanType, Stage,
};
use sales_planner::domain::pricing::UnitPrice;
use sales_planner::ports::{CustomerUnitActuals, PlanRowRepository};

struct TestWorld {
    plan_repository: Arc<InMemoryPlanRowRepository>,
    invoice_history: Arc<InMemoryInvoiceHistoryReader>,
    remark_repository: Arc<InMemoryPlanRemarkRepository>,
    price_source: Arc<InMemoryAvgPriceSource>,
    price_resolver: Arc<UnitPriceResolver>,
}

impl TestWorld {
    fn new() -> Self {
        let price_source = Arc::new(InMemoryAvgPriceSource::new());
        let price_resolver = Arc::new(UnitPriceResolver::new(price_source.clone()));
        Self {
            plan_repository: Arc::new(InMemoryPlanRowRepository::new()),
            invoice_history: Arc::new(InMemoryInvoiceHistoryReader::new()),
            remark_repository: Arc::new(InMemoryPlanRemarkRepository::new()),
            price_source,
            price_resolver,
        }
    }

    fn init_baseline(&self) -> InitBaselineHandler {
        InitBaselineHandler::new(
            self.plan_repository.clone(),
            self.invoice_history.clone(),
            self.price_resolver.clone(),
        )
    }

    fn upsert(&self) -> UpsertPlanRowHandler {
        UpsertPlanRowHandler::new(self.plan_repository.clone(), self.price_resolver.clone())
    }

    fn bulk_ratio(&self) -> BulkRatioHandler {
        BulkRatioHandler::new(self.plan_repository.clone(), self.price_resolver.clone())
    }

    fn add_units(&self) -> AddPlanUnitsHandler {
        AddPlanUnitsHandler::new(self.plan_repository.clone(), self.price_resolver.clone())
    }

    fn confirm(&self) -> ConfirmCustomerHandler {
        ConfirmCustomerHandler::new(self.plan_repository.clone())
    }
}

fn year() -> PlanYear {
    PlanYear::try_new(2026).unwrap()
}

fn rep() -> AssigneeId {
    AssigneeId::new("rep-1").unwrap()
}

fn customer() -> CustomerId {
    CustomerId::new("C-1").unwrap()
}

fn actuals(customer: &str, unit: &str, qty: [f64; 12]) -> CustomerUnitActuals {
    CustomerUnitActuals {
        customer_id: CustomerId::new(customer).unwrap(),
        customer_name: Some(format!("{} Corp", customer)),
        item_subcategory: "Frozen".to_string(),
        sales_mgmt_unit: unit.to_string(),
        qty: MonthlyQty::from_values(qty),
    }
}

fn case_price(avg: f64) -> UnitPrice {
    UnitPrice {
        sales_mgmt_unit: "CASE".to_string(),
        avg_price: avg,
        total_amount: avg * 100.0,
        total_qty: 100.0,
        item_unit: Some("pcs".to_string()),
        item_std_unit: None,
    }
}

#[tokio::test]
async fn full_lifecycle_from_baseline_to_confirmation() {
    let world = TestWorld::new();

    // Prior-year history: one customer, one unit, steady 100/month.
    world
        .invoice_history
        .set_actuals(CompanyType::CompanyA, &rep(), 2025, vec![actuals("C-1", "CASE", [100.0; 12])])
        .await;
    world
        .price_source
        .set_company_prices(CompanyType::CompanyA, 2025, vec![case_price(500.0)])
        .await;

    // 1. Seed with +10% uplift.
    let seeded = world
        .init_baseline()
        .handle(InitBaselineCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            uplift_percent: UpliftPercent::try_new(10.0).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(seeded.seeded, 1);

    let rows = world
        .plan_repository
        .find_by_customer(year(), CompanyType::CompanyA, &rep(), &customer())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].plan_type(), PlanType::Baseline);
    assert_eq!(rows[0].stage(), Stage::Initial);
    assert_eq!(rows[0].qty().values()[0], 110.0);
    assert_eq!(rows[0].amount().values()[0], 55_000);

    // 2. Replace the row with an explicit distribution: 120 from July.
    let result = world
        .upsert()
        .handle(UpsertPlanRowCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            customer_id: customer(),
            customer_name: Some("C-1 Corp".to_string()),
            item_subcategory: "Frozen".to_string(),
            sales_mgmt_unit: "CASE".to_string(),
            input: QtyInput::Distribute {
                start_month: 7,
                total_qty: 120.0,
            },
            explicit_amount: None,
            reopen: false,
        })
        .await
        .unwrap();
    assert!(!result.created);
    assert_eq!(result.row.stage(), Stage::Planning);
    assert_eq!(result.row.qty().values()[6], 20.0);
    assert_eq!(result.row.qty().values()[0], 0.0);
    assert_eq!(result.row.amount().values()[6], 10_000);

    // Baseline re-seed is refused once manual planning started.
    let refused = world
        .init_baseline()
        .handle(InitBaselineCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            uplift_percent: UpliftPercent::ZERO,
        })
        .await;
    assert!(matches!(refused, Err(InitBaselineError::BaselineRefused)));

    // 3. Scale everything by +50%.
    let scaled = world
        .bulk_ratio()
        .handle(BulkRatioCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            customer_id: customer(),
            percent: RatioPercent::try_new(50.0).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(scaled.applied, 1);

    let rows = world
        .plan_repository
        .find_by_customer(year(), CompanyType::CompanyA, &rep(), &customer())
        .await
        .unwrap();
    assert_eq!(rows[0].qty().values()[6], 30.0);

    // 4. Add a second unit; adding the existing one is rejected wholesale.
    let conflict = world
        .add_units()
        .handle(AddPlanUnitsCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            customer_id: customer(),
            customer_name: None,
            items: vec![
                NewUnitItem {
                    item_subcategory: "Frozen".to_string(),
                    sales_mgmt_unit: "PALLET".to_string(),
                    start_month: 1,
                    total_qty: 24.0,
                },
                NewUnitItem {
                    item_subcategory: "Frozen".to_string(),
                    sales_mgmt_unit: "CASE".to_string(),
                    start_month: 1,
                    total_qty: 12.0,
                },
            ],
        })
        .await;
    match conflict {
        Err(AddPlanUnitsError::DuplicateUnits(units)) => assert_eq!(units, vec!["CASE"]),
        other => panic!("expected duplicate rejection, got {:?}", other.is_ok()),
    }
    // Nothing was written by the rejected batch.
    let rows = world
        .plan_repository
        .find_by_customer(year(), CompanyType::CompanyA, &rep(), &customer())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let added = world
        .add_units()
        .handle(AddPlanUnitsCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            customer_id: customer(),
            customer_name: None,
            items: vec![NewUnitItem {
                item_subcategory: "Frozen".to_string(),
                sales_mgmt_unit: "PALLET".to_string(),
                start_month: 1,
                total_qty: 24.0,
            }],
        })
        .await
        .unwrap();
    assert_eq!(added.added, 1);

    // 5. Status is Planning until confirmation, then Confirmed.
    let all_rows = world
        .plan_repository
        .find_by_assignee(year(), &rep())
        .await
        .unwrap();
    let counts = customer_status_counts(&all_rows);
    assert_eq!(counts.total, 1);
    assert_eq!(counts.in_progress, 1);

    let confirmed = world
        .confirm()
        .handle(ConfirmCustomerCommand {
            year: year(),
            company_type: Some(CompanyType::CompanyA),
            assignee_id: rep(),
            customer_id: customer(),
        })
        .await
        .unwrap();
    assert_eq!(confirmed.confirmed, 2);

    let all_rows = world
        .plan_repository
        .find_by_assignee(year(), &rep())
        .await
        .unwrap();
    assert!(all_rows.iter().all(|r| r.stage() == Stage::Confirmed));
    let counts = customer_status_counts(&all_rows);
    assert_eq!(counts.confirmed, 1);

    // Totals include both units: CASE 6 x 30 x 500 + PALLET (no price).
    let totals = totals_by_company(&all_rows);
    assert_eq!(totals[&CompanyType::CompanyA], 90_000);
}

#[tokio::test]
async fn confirmed_rows_need_reopen_to_edit() {
    let world = TestWorld::new();

    let cmd = UpsertPlanRowCommand {
        year: year(),
        company_type: CompanyType::CompanyA,
        assignee_id: rep(),
        customer_id: customer(),
        customer_name: None,
        item_subcategory: "Frozen".to_string(),
        sales_mgmt_unit: "CASE".to_string(),
        input: QtyInput::Explicit { qty: [1.0; 12] },
        explicit_amount: None,
        reopen: false,
    };
    world.upsert().handle(cmd.clone()).await.unwrap();
    world
        .confirm()
        .handle(ConfirmCustomerCommand {
            year: year(),
            company_type: None,
            assignee_id: rep(),
            customer_id: customer(),
        })
        .await
        .unwrap();

    // Without reopen the edit is refused.
    let refused = world.upsert().handle(cmd.clone()).await;
    assert!(matches!(
        refused,
        Err(UpsertPlanRowError::ConfirmedRow { .. })
    ));

    // With reopen the row returns to Planning.
    let mut reopened = cmd;
    reopened.reopen = true;
    reopened.input = QtyInput::Explicit { qty: [2.0; 12] };
    let result = world.upsert().handle(reopened).await.unwrap();
    assert_eq!(result.row.stage(), Stage::Planning);
    assert_eq!(result.row.qty().values()[0], 2.0);
}

#[tokio::test]
async fn confirming_nothing_is_an_error() {
    let world = TestWorld::new();

    let result = world
        .confirm()
        .handle(ConfirmCustomerCommand {
            year: year(),
            company_type: None,
            assignee_id: rep(),
            customer_id: customer(),
        })
        .await;

    assert!(matches!(
        result,
        Err(ConfirmCustomerError::NothingToConfirm)
    ));
}

#[tokio::test]
async fn remarks_attach_to_existing_plans_only() {
    let world = TestWorld::new();
    let save = SavePlanRemarkHandler::new(
        world.remark_repository.clone(),
        world.plan_repository.clone(),
    );
    let get = GetPlanRemarkHandler::new(world.remark_repository.clone());

    // No plan rows yet: save is rejected.
    let orphan = save
        .handle(SavePlanRemarkCommand {
            year: year(),
            assignee_id: rep(),
            customer_id: customer(),
            remark: "note".to_string(),
        })
        .await;
    assert!(orphan.is_err());

    world
        .upsert()
        .handle(UpsertPlanRowCommand {
            year: year(),
            company_type: CompanyType::CompanyB,
            assignee_id: rep(),
            customer_id: customer(),
            customer_name: None,
            item_subcategory: "Chilled".to_string(),
            sales_mgmt_unit: "BOX".to_string(),
            input: QtyInput::Explicit { qty: [1.0; 12] },
            explicit_amount: None,
            reopen: false,
        })
        .await
        .unwrap();

    save.handle(SavePlanRemarkCommand {
        year: year(),
        assignee_id: rep(),
        customer_id: customer(),
        remark: "Key account, revisit in Q3".to_string(),
    })
    .await
    .unwrap();

    let read = get
        .handle(GetPlanRemarkQuery {
            year: year(),
            assignee_id: rep(),
            customer_id: customer(),
        })
        .await
        .unwrap();
    assert_eq!(read.remark.as_deref(), Some("Key account, revisit in Q3"));
}

#[tokio::test]
async fn assignee_price_history_wins_over_company_average() {
    let world = TestWorld::new();
    world
        .price_source
        .set_assignee_prices(CompanyType::CompanyA, &rep(), 2025, vec![case_price(450.0)])
        .await;
    world
        .price_source
        .set_company_prices(CompanyType::CompanyA, 2025, vec![case_price(500.0)])
        .await;

    let result = world
        .upsert()
        .handle(UpsertPlanRowCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            customer_id: customer(),
            customer_name: None,
            item_subcategory: "Frozen".to_string(),
            sales_mgmt_unit: "CASE".to_string(),
            input: QtyInput::Explicit {
                qty: [10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            },
            explicit_amount: None,
            reopen: false,
        })
        .await
        .unwrap();

    assert_eq!(result.row.amount().values()[0], 4_500);
}
