use maud::{html, Markup};

use crate::templates::layouts::{base, PageConfig};

pub struct HomeData<'a> {
    pub dataset_source: &'a str,
    pub latest_date: Option<&'a str>,
    pub station_count: usize,
}

/// Route and what it returns
const ROUTES: &[(&str, &str)] = &[
    (
        "/api/v1.0/precipitation",
        "Precipitation per date over the last 12 months of data",
    ),
    ("/api/v1.0/stations", "Every known weather station"),
    (
        "/api/v1.0/tobs",
        "Temperatures of the most active station over the last 12 months of data",
    ),
    (
        "/api/v1.0/<start>",
        "[min, avg, max] temperature from start (YYYY-MM-DD) onwards",
    ),
    (
        "/api/v1.0/<start>/<end>",
        "[min, avg, max] temperature between start and end, inclusive",
    ),
];

pub fn home_page(api_base: &str, data: &HomeData) -> Markup {
    let config = PageConfig {
        title: "Climate App",
        api_base,
    };

    base(&config, content(api_base, data))
}

fn content(api_base: &str, data: &HomeData) -> Markup {
    html! {
        div class="content" {
            p { "Welcome to the Climate App! Available routes:" }
            table class="table is-fullwidth" {
                thead {
                    tr {
                        th { "Route" }
                        th { "Returns" }
                    }
                }
                tbody {
                    @for (route, description) in ROUTES {
                        tr {
                            td {
                                @if route.contains('<') {
                                    code { (route) }
                                } @else {
                                    a href={ (api_base) (route) } { code { (route) } }
                                }
                            }
                            td { (description) }
                        }
                    }
                }
            }

            p class="is-size-7" {
                "Dataset: " code { (data.dataset_source) }
                " | Stations: " (data.station_count)
                " | Latest observation: "
                @match data.latest_date {
                    Some(latest) => {
                        a href={ (api_base) "/api/v1.0/" (latest) } { (latest) }
                    }
                    None => { "none" }
                }
            }
        }
    }
}
