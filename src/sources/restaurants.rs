// src/sources/restaurants.rs
//! The restaurants we scrape. Selectors here are site-specific and break
//! whenever a site is redesigned; the pipeline turns that into a
//! "check it yourself" line.

use std::sync::Arc;

use super::extract::{
    DaySection, PositionalBlock, PostProcess, PricedRows, SelectorList, TablePaging,
};
use super::{Source, StaticSource, UnsupportedSource, WebSource};
use crate::calendar::Locale;
use crate::transport::Transport;

pub const OTHER_NAME: &str = "Iné";

/// Always-available list of places without a daily menu. Leads the digest.
pub fn other() -> StaticSource {
    StaticSource::new(
        OTHER_NAME,
        &[
            ":car: Bistro.sk",
            ":pizza: TOTO Pizza",
            ":ramen: Mango",
            ":hamburger: Bigger",
            ":male-cook: Chefstreet",
            ":watermelon: Freshmarket",
            ":middle_finger: Hladovka",
        ],
    )
}

/// restauracie.sme.sk pages show only today's menu.
fn sme(name: &str, url: &str, http: &Arc<dyn Transport>) -> WebSource {
    WebSource::new(
        name,
        url,
        http.clone(),
        SelectorList::new(".jedlo_polozka").within(".dnesne_menu"),
    )
}

/// Every scraped restaurant, in launch order.
pub fn all(http: Arc<dyn Transport>) -> Vec<Arc<dyn Source>> {
    let http = &http;
    vec![
        Arc::new(WebSource::new(
            "TOTO (4.9€ / 4.2€ bez polievky / 6.2€ extra menu / 7.4€ business menu)",
            "https://www.totorestaurant.sk/toto-restaurant",
            http.clone(),
            PositionalBlock::new("div.pb-6", "p").inside("div.container", 1),
        )),
        Arc::new(WebSource::new(
            "TOTO Kantína (4.9€ / 4.2€ bez polievky)",
            "https://totorestaurant.sk/toto-kantina",
            http.clone(),
            PositionalBlock::new("div.pb-6", "p").inside("div.container", 4),
        )),
        Arc::new(WebSource::new(
            "Avalon",
            "https://avalonrestaurant.sk/denne-menu/",
            http.clone(),
            PositionalBlock::new("section.article__content", "p"),
        )),
        Arc::new(sme(
            "Oliva",
            "https://restauracie.sme.sk/restauracia/oliva-restaurant-premium-business-hotel_2717-ruzinov_2980/denne-menu",
            http,
        )),
        Arc::new(UnsupportedSource::new(
            "Casa Inka (5.5€ / 6€ špecialita)",
            "http://www.casa-inka.sk/index.php?page=jedalny&kategoria=menu",
        )),
        Arc::new(WebSource::new(
            "City Cantina Rosum",
            "https://restauracie.sme.sk/restauracia/city-cantina-rosum_8439-ruzinov_2980/denne-menu",
            http.clone(),
            SelectorList::new(".jedlo_polozka")
                .within(".dnesne_menu")
                .post_process(PostProcess::AllergenContinuations),
        )),
        Arc::new(sme(
            "Don Quijote (5.5€)",
            "https://restauracie.sme.sk/restauracia/don-quijote_7436-nove-mesto_2653/denne-menu",
            http,
        )),
        Arc::new(sme(
            "Kantína (4.8€ / 4€ bez polievky)",
            "https://restauracie.sme.sk/restauracia/kantina-vsetko-okolo-jedla_10102-bratislava_2983/denne-menu",
            http,
        )),
        Arc::new(sme(
            "Menu u Jeleňa",
            "https://restauracie.sme.sk/restauracia/menu-u-jelena_9787-nove-mesto_2653/denne-menu",
            http,
        )),
        Arc::new(WebSource::new(
            "Plzenská brána (5.70)",
            "https://menucka.sk/denne-menu/bratislava/plzenska-brana",
            http.clone(),
            SelectorList::new(".col-xs-10").within("#restaurant-actual-menu-id-2024"),
        )),
        Arc::new(WebSource::new(
            "Dream's",
            "http://www.dreams-res.sk/menu/daily_menu_sk.php",
            http.clone(),
            PricedRows::new("td#jedlo", "td#cena"),
        )),
        Arc::new(WebSource::new(
            "Gastrohouse a.k.a. vývarovňa Slimák (4.2€)",
            "http://gastrohouse.sk/",
            http.clone(),
            DaySection::new("section.denne-menu section", "h2", "li h3", Locale::Slovak),
        )),
        Arc::new(WebSource::new(
            "Jedáleň Jarošová (3.79€)",
            "http://vasestravovanie.sk/jedalny-listok-sav/",
            http.clone(),
            TablePaging::new("table tbody tr td").with_attr("colspan", &["5", "6"]),
        )),
    ]
}

/// Scraped restaurants minus the ones switched off in config.
pub fn enabled(http: Arc<dyn Transport>, disabled: &[String]) -> Vec<Arc<dyn Source>> {
    all(http)
        .into_iter()
        .filter(|s| !is_disabled(s.name(), disabled))
        .collect()
}

/// Case-insensitive prefix match, so `"TOTO"` does not need the price suffix.
fn is_disabled(name: &str, disabled: &[String]) -> bool {
    let name = name.to_lowercase();
    disabled
        .iter()
        .any(|d| name == d.to_lowercase() || name.starts_with(&format!("{} (", d.to_lowercase())))
}
