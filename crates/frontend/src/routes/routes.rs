use leptos::prelude::*;

use crate::domain::channel_transaction::ui::list::ChannelTransactionList;
use crate::domain::expense_type::ui::list::ExpenseTypeList;
use crate::domain::goods_receipt::ui::receive::ReceiveGoodsPage;
use crate::domain::location::ui::list::LocationList;
use crate::domain::lodgement::ui::list::LodgementList;
use crate::domain::notification::ui::list::NotificationList;
use crate::domain::price_scheme::ui::list::PriceSchemeList;
use crate::domain::substore::ui::list::SubstoreList;
use crate::layout::Shell;
use crate::system::pages::about::AboutPage;

/// The console's screens. Navigation is a plain enum and a `match`;
/// each screen mounts fresh, so its query state dies on navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Lodgements,
    ChannelTransactions,
    Substores,
    ReceiveGoods,
    Notifications,
    ExpenseTypes,
    Locations,
    PriceSchemes,
    About,
}

impl Screen {
    pub const ALL: [Screen; 9] = [
        Screen::Lodgements,
        Screen::ChannelTransactions,
        Screen::Substores,
        Screen::ReceiveGoods,
        Screen::Notifications,
        Screen::ExpenseTypes,
        Screen::Locations,
        Screen::PriceSchemes,
        Screen::About,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Lodgements => "Lodgements",
            Screen::ChannelTransactions => "Car wash & lubebay",
            Screen::Substores => "Substores",
            Screen::ReceiveGoods => "Receive goods",
            Screen::Notifications => "Notifications",
            Screen::ExpenseTypes => "Expense types",
            Screen::Locations => "Locations",
            Screen::PriceSchemes => "Price schemes",
            Screen::About => "About",
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn AppRoutes() -> impl IntoView {
    let (active, set_active) = signal(Screen::Lodgements);

    view! {
        <Shell active=active on_navigate=Callback::new(move |screen| set_active.set(screen))>
            {move || match active.get() {
                Screen::Lodgements => view! { <LodgementList /> }.into_any(),
                Screen::ChannelTransactions => view! { <ChannelTransactionList /> }.into_any(),
                Screen::Substores => view! { <SubstoreList /> }.into_any(),
                Screen::ReceiveGoods => view! { <ReceiveGoodsPage /> }.into_any(),
                Screen::Notifications => view! { <NotificationList /> }.into_any(),
                Screen::ExpenseTypes => view! { <ExpenseTypeList /> }.into_any(),
                Screen::Locations => view! { <LocationList /> }.into_any(),
                Screen::PriceSchemes => view! { <PriceSchemeList /> }.into_any(),
                Screen::About => view! { <AboutPage /> }.into_any(),
            }}
        </Shell>
    }
}
