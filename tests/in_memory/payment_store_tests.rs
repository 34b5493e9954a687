//! In-memory integration tests for the payment store.

use super::helpers::EXECUTOR;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use std::sync::Arc;
use taskmarket::{
    config::{ClientConfig, Locale},
    identity::UserId,
    payment::{
        adapters::memory::InMemoryPaymentGateway,
        domain::{TransactionAmount, TransactionStatus, TransactionType},
        services::PaymentStore,
    },
    tracker::StoreStatus,
};

type TestPaymentGateway = InMemoryPaymentGateway<mockable::DefaultClock>;

#[fixture]
fn gateway() -> TestPaymentGateway {
    TestPaymentGateway::new(EXECUTOR)
}

fn amount(value: i64) -> eyre::Result<TransactionAmount> {
    Ok(TransactionAmount::new(Decimal::from(value))?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deposit_then_payout_builds_history(gateway: TestPaymentGateway) -> eyre::Result<()> {
    let store = PaymentStore::new(Arc::new(gateway.clone()));

    store.create_deposit(amount(1000)?).await;
    store.request_payout(amount(300)?).await;

    let history = store.transactions();
    let kinds: Vec<_> = history
        .iter()
        .map(|transaction| (transaction.transaction_type(), transaction.status()))
        .collect();
    eyre::ensure!(
        kinds
            == vec![
                (TransactionType::Payout, TransactionStatus::Pending),
                (TransactionType::Deposit, TransactionStatus::Completed),
            ]
    );

    store.list().await;
    eyre::ensure!(store.transactions() == history, "list returns the same history");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn balance_is_reported_by_backend(gateway: TestPaymentGateway) -> eyre::Result<()> {
    gateway.credit(Decimal::from(200))?;
    let store = PaymentStore::new(Arc::new(gateway.clone()));

    store.create_deposit(amount(50)?).await;
    eyre::ensure!(store.balance().is_none(), "balance is never derived");

    store.set_balance(gateway.balance()?);

    eyre::ensure!(store.balance() == Some(Decimal::from(250)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payout_beyond_balance_is_rejected(gateway: TestPaymentGateway) -> eyre::Result<()> {
    gateway.credit(Decimal::from(100))?;
    let config = ClientConfig::default().with_locale(Locale::Russian);
    let store = PaymentStore::with_config(Arc::new(gateway.clone()), &config);

    let settlement = store.request_payout(amount(500)?).await;

    eyre::ensure!(settlement.failure_message() == Some("insufficient funds"));
    eyre::ensure!(store.transactions().is_empty());
    eyre::ensure!(store.status() == StoreStatus::Error);
    eyre::ensure!(gateway.balance()? == Decimal::from(100));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_users_history_is_not_listed(gateway: TestPaymentGateway) -> eyre::Result<()> {
    let other_store = PaymentStore::new(Arc::new(gateway.as_user(UserId::new(8))));
    let store = PaymentStore::new(Arc::new(gateway));

    other_store.create_deposit(amount(10)?).await;
    store.list().await;

    eyre::ensure!(store.transactions().is_empty());
    eyre::ensure!(store.status() == StoreStatus::Settled);
    Ok(())
}
