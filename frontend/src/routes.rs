use dioxus::prelude::*;

use crate::pages::datasets_page::DatasetsPage;
use crate::pages::home_page::HomePage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    HomePage {},


    #[route("/organization/:organization_id/datasets")]
    DatasetsPage { organization_id: String },
}
