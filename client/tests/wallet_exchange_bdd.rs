//! Behavioural tests for the coins-to-diamonds exchange flow.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rooms_client::domain::ports::{
    ExchangeGateway, ExchangeGatewayError, ExchangeRequest, UserProfileQuery,
    UserProfileQueryError,
};
use rooms_client::domain::{
    AmountRejection, DisplayName, ExchangeController, ExchangeError, Notice, UserId, UserProfile,
    Wallet, WalletExchangeService,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};

const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[derive(Debug, Clone, Copy)]
enum GatewayBehaviour {
    Confirm,
    Reject,
    Stall,
}

/// Exchange gateway that records amounts and answers as scripted.
struct ScriptedGateway {
    behaviour: GatewayBehaviour,
    received: Mutex<Vec<u64>>,
}

#[async_trait]
impl ExchangeGateway for ScriptedGateway {
    async fn exchange_coins_to_diamonds(
        &self,
        request: &ExchangeRequest,
    ) -> Result<(), ExchangeGatewayError> {
        self.received
            .lock()
            .expect("received mutex")
            .push(request.amount.get());
        match self.behaviour {
            GatewayBehaviour::Confirm => Ok(()),
            GatewayBehaviour::Reject => Err(ExchangeGatewayError::rejected(
                409_u16,
                "not enough coins on the server",
            )),
            GatewayBehaviour::Stall => {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok(())
            }
        }
    }
}

/// Profile query serving a fixed wallet, or failing when none is set.
struct ScriptedProfiles {
    wallet: Option<Wallet>,
}

#[async_trait]
impl UserProfileQuery for ScriptedProfiles {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, UserProfileQueryError> {
        let wallet = self
            .wallet
            .ok_or_else(|| UserProfileQueryError::transport("profile service offline"))?;
        Ok(UserProfile {
            id: user_id.clone(),
            display_name: DisplayName::new("Layla").expect("display name"),
            bio: Default::default(),
            country: None,
            age: None,
            gender: None,
            avatar: None,
            vip_level: 0,
            wallet,
        })
    }
}

type Controller = ExchangeController<ScriptedGateway, ScriptedProfiles>;

#[derive(Clone)]
struct RuntimeHandle(Arc<Runtime>);

#[derive(Clone)]
struct ControllerHandle(Arc<Mutex<Controller>>);

#[derive(Default, ScenarioState)]
struct World {
    runtime: Slot<RuntimeHandle>,
    wallet: Slot<Wallet>,
    gateway: Slot<Arc<ScriptedGateway>>,
    controller: Slot<ControllerHandle>,
    open_result: Slot<Result<(), ExchangeError>>,
    submit_result: Slot<Result<(), ExchangeError>>,
    notice: Slot<Option<Notice>>,
}

impl World {
    fn runtime(&self) -> Arc<Runtime> {
        if let Some(RuntimeHandle(runtime)) = self.runtime.get() {
            return runtime;
        }
        let runtime = Arc::new(
            Builder::new_current_thread()
                .enable_all()
                .start_paused(true)
                .build()
                .expect("create runtime"),
        );
        self.runtime.set(RuntimeHandle(Arc::clone(&runtime)));
        runtime
    }

    fn install_backend(&self, behaviour: GatewayBehaviour, reloaded: Option<Wallet>) {
        let gateway = Arc::new(ScriptedGateway {
            behaviour,
            received: Mutex::new(Vec::new()),
        });
        let service = WalletExchangeService::new(
            Arc::clone(&gateway),
            Arc::new(ScriptedProfiles { wallet: reloaded }),
        );
        let user_id = UserId::new(USER).expect("user id");
        let wallet = self.wallet.get().expect("wallet should be set");
        let controller = ExchangeController::new(service, user_id, wallet);
        self.gateway.set(gateway);
        self.controller
            .set(ControllerHandle(Arc::new(Mutex::new(controller))));
    }

    fn with_controller<T>(&self, action: impl FnOnce(&mut Controller) -> T) -> T {
        let ControllerHandle(controller) = self.controller.get().expect("controller should be set");
        let mut guard = controller.lock().expect("controller mutex");
        action(&mut guard)
    }

    fn received(&self) -> Vec<u64> {
        self.gateway
            .get()
            .expect("gateway should be set")
            .received
            .lock()
            .expect("received mutex")
            .clone()
    }

    fn notice(&self) -> Notice {
        self.notice
            .get()
            .expect("submission should have settled")
            .expect("a notice should be shown")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("a wallet holding {coins:u64} coins")]
fn a_wallet_holding_coins(world: &World, coins: u64) {
    world.wallet.set(Wallet::new(coins, 3));
}

#[given("a backend that confirms exchanges and then reports {coins:u64} coins")]
fn a_backend_that_confirms_and_reports(world: &World, coins: u64) {
    world.install_backend(GatewayBehaviour::Confirm, Some(Wallet::new(coins, 8)));
}

#[given("a backend that confirms exchanges but cannot reload the profile")]
fn a_backend_that_cannot_reload(world: &World) {
    world.install_backend(GatewayBehaviour::Confirm, None);
}

#[given("a backend that rejects exchanges")]
fn a_backend_that_rejects_exchanges(world: &World) {
    world.install_backend(GatewayBehaviour::Reject, None);
}

#[given("a backend that never answers")]
fn a_backend_that_never_answers(world: &World) {
    world.install_backend(GatewayBehaviour::Stall, None);
}

#[when("the user opens the exchange dialog")]
fn the_user_opens_the_exchange_dialog(world: &World) {
    let result = world.with_controller(Controller::open);
    world.open_result.set(result);
}

#[when("the user types {text}")]
fn the_user_types(world: &World, text: String) {
    let accepted = world.with_controller(|controller| controller.edit(text.trim_matches('"')));
    assert!(accepted, "the dialog should accept input");
}

#[when("the user submits the exchange")]
fn the_user_submits_the_exchange(world: &World) {
    let runtime = world.runtime();
    let (submitted, notice) = world.with_controller(|controller| {
        runtime.block_on(async {
            let submitted = controller.submit();
            (submitted, controller.next_settlement().await)
        })
    });
    world.submit_result.set(submitted);
    world.notice.set(notice);
}

#[then("the backend receives an exchange of {coins:u64} coins")]
fn the_backend_receives_an_exchange(world: &World, coins: u64) {
    assert_eq!(world.received(), vec![coins]);
}

#[then("the backend receives no exchange")]
fn the_backend_receives_no_exchange(world: &World) {
    assert!(world.received().is_empty());
}

#[then("the success notice is shown")]
fn the_success_notice_is_shown(world: &World) {
    assert!(matches!(world.notice(), Notice::ExchangeSucceeded { .. }));
}

#[then("the failure notice {code} is shown")]
fn the_failure_notice_is_shown(world: &World, code: String) {
    let notice = world.notice();
    assert!(notice.is_failure());
    assert_eq!(notice.code(), code.trim_matches('"'));
}

#[then("the dialog is closed")]
fn the_dialog_is_closed(world: &World) {
    assert!(!world.with_controller(|controller| controller.dialog().is_open()));
}

#[then("the wallet shows {coins:u64} coins")]
fn the_wallet_shows_coins(world: &World, coins: u64) {
    assert_eq!(world.with_controller(|controller| controller.wallet().coins), coins);
}

#[then("the exchange is refused as an invalid amount")]
fn the_exchange_is_refused_as_an_invalid_amount(world: &World) {
    assert_eq!(
        world.submit_result.get().expect("submission should have run"),
        Err(ExchangeError::InvalidAmount(AmountRejection::ExceedsBalance {
            available: 100
        }))
    );
    assert_eq!(world.notice.get(), Some(None));
}

#[then("the dialog is still open with {text}")]
fn the_dialog_is_still_open_with(world: &World, text: String) {
    let input = world.with_controller(|controller| controller.dialog().input().map(str::to_owned));
    assert_eq!(input.as_deref(), Some(text.trim_matches('"')));
}

#[then("the user can submit again")]
fn the_user_can_submit_again(world: &World) {
    assert!(world.with_controller(|controller| controller.dialog().can_submit()));
}

#[then("the dialog refuses to open for lack of coins")]
fn the_dialog_refuses_to_open(world: &World) {
    assert_eq!(world.open_result.get(), Some(Err(ExchangeError::NoFunds)));
    assert!(!world.with_controller(|controller| controller.dialog().is_open()));
}

#[scenario(
    path = "tests/features/wallet_exchange.feature",
    name = "A valid amount is exchanged and the wallet is reloaded"
)]
fn valid_amount_is_exchanged(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/wallet_exchange.feature",
    name = "The wallet is left alone when the reload fails"
)]
fn wallet_is_left_alone_without_reload(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/wallet_exchange.feature",
    name = "An amount above the balance is refused locally"
)]
fn amount_above_balance_is_refused(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/wallet_exchange.feature",
    name = "An empty wallet cannot open the dialog"
)]
fn empty_wallet_cannot_open(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/wallet_exchange.feature",
    name = "A backend rejection keeps the typed amount"
)]
fn rejection_keeps_the_amount(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/wallet_exchange.feature",
    name = "A backend that never answers times out"
)]
fn silent_backend_times_out(world: World) {
    drop(world);
}
