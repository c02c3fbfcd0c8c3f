use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page page--about">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"About Depot Console"}</h1>
                </div>
            </div>
            <div class="about-content">
                <p>
                    {"Depot Console is the back-office for our distribution network: \
                      teller lodgements, car wash and lubebay tickets, substore stock, \
                      storekeeper receiving and the pricing registers, all in one place."}
                </p>
                <p>
                    {"Records live on the central API; this console is a window onto \
                      them. Numbers refresh after every posting, so what you see is \
                      what head office sees."}
                </p>
            </div>
        </div>
    }
}
