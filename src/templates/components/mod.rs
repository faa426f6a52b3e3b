use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Summary tile whose value is filled in by the dashboard script.
pub fn stat_card(title: &str, value_id: &str) -> Markup {
    card(
        title,
        html! {
            div class="stat-value" id=(value_id) { "…" }
        },
    )
}

pub fn select_field(label: &str, name: &str, options: &[String]) -> Markup {
    html! {
        label {
            (label)
            select name=(name) id=(name) required {
                @for opt in options {
                    option value=(opt) { (opt) }
                }
            }
        }
    }
}

pub fn number_field(label: &str, name: &str, min: u32, step: u32) -> Markup {
    html! {
        label {
            (label)
            input type="number" name=(name) id=(name) min=(min) step=(step) required;
        }
    }
}
