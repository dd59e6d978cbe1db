use dioxus::prelude::*;

use crate::components::dataset_components::dataset_overview::DatasetOverview;

#[component]
pub fn DatasetsPage(organization_id: String) -> Element {
    rsx! {
        Title { "Datasets - {organization_id}" }
        DatasetOverview { organization_id: Some(organization_id.clone()) }
    }
}
