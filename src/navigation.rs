// Explicit navigation state for the storefront

use serde::Serialize;

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "view")]
pub enum View {
    #[default]
    Home,
    Search,
    Dealerships,
    SellCar,
    Login,
    // Details overlay, remembering where it was opened from
    CarDetails { id: String, from: Box<View> },
}

impl View {
    pub fn fragment(&self) -> String {
        match self {
            View::Home => "#".to_string(),
            View::Search => "#search".to_string(),
            View::Dealerships => "#dealerships".to_string(),
            View::SellCar => "#sell-car".to_string(),
            View::Login => "#login".to_string(),
            View::CarDetails { id, .. } => format!("#car/{id}"),
        }
    }

    // The page underneath any overlay
    pub fn base(&self) -> &View {
        match self {
            View::CarDetails { from, .. } => from.base(),
            other => other,
        }
    }
}

// Parses a URL fragment, given the current view; None for unknown fragments
pub fn navigate(current: &View, fragment: &str) -> Option<View> {
    let view = match fragment {
        "" | "#" => View::Home,
        "#search" => View::Search,
        "#dealerships" => View::Dealerships,
        "#sell-car" => View::SellCar,
        "#login" => View::Login,
        other => {
            let id = other.strip_prefix("#car/").filter(|id| !id.is_empty())?;
            View::CarDetails {
                id: id.to_string(),
                from: Box::new(current.base().clone()),
            }
        }
    };
    Some(view)
}

// Opening details for a listing that exists in the catalog
pub fn open_details(current: &View, id: &str, exists: impl Fn(&str) -> bool) -> Option<View> {
    exists(id).then(|| View::CarDetails {
        id: id.to_string(),
        from: Box::new(current.base().clone()),
    })
}

// Closing details goes back to search results or the dealership directory when
// opened from one of them, else home
pub fn close_details(current: &View) -> View {
    match current {
        View::CarDetails { from, .. } => match from.base() {
            View::Search => View::Search,
            View::Dealerships => View::Dealerships,
            _ => View::Home,
        },
        other => other.clone(),
    }
}
