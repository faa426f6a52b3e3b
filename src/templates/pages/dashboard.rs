use crate::templates::components::{card, number_field, select_field, stat_card};
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// The select options are the labels the loaded model was trained on.
pub fn dashboard_page(cities: &[String], property_types: &[String]) -> Markup {
    desktop_layout(
        "Real Estate Dashboard",
        html! {
            main class="container" {
                h1 { "Market overview" }

                section class="stats" {
                    (stat_card("Total listings", "totalListings"))
                    (stat_card("Average price", "avgPrice"))
                    (stat_card("Lowest price", "minPrice"))
                    (stat_card("Highest price", "maxPrice"))
                }

                section class="charts" {
                    (card("Price by area", html! { canvas id="priceChart" {} }))
                    (card("Average price by city", html! { canvas id="cityChart" {} }))
                }

                (card("Predict a price", prediction_form(cities, property_types)))
            }
        },
    )
}

fn prediction_form(cities: &[String], property_types: &[String]) -> Markup {
    html! {
        form class="predict" id="predictionForm" {
            (number_field("Area (sq ft)", "area", 1, 1))
            (number_field("Bedrooms", "bedrooms", 1, 1))
            (number_field("Bathrooms", "bathrooms", 1, 1))
            (select_field("City", "city", cities))
            (select_field("Property type", "property_type", property_types))
            button type="submit" { "Predict" }
        }
        div class="result" id="predictionResult" {}
    }
}
