//! Pages of the authenticated booking site: login form, booked schedule and
//! cart.

use std::collections::BTreeSet;

use crate::dom::{Element, HtmlDocument};

/// Link labels that advance the cart towards confirmation.
const CHECKOUT_LABELS: [&str; 2] = ["next", "proceed"];

/// A login form ready to be filled in and submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// `action` attribute as written on the page; may be relative.
    pub action: String,
    /// Successful form controls in document order (hidden tokens included).
    pub fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Set `name` to `value`, replacing an existing field of that name.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }
}

/// First form whose `action` mentions `session`, with its submittable inputs.
#[must_use]
pub fn find_login_form(doc: &HtmlDocument) -> Option<LoginForm> {
    let form = doc.root().find_first(|el| {
        el.tag() == "form" && el.attr("action").is_some_and(|action| action.contains("session"))
    })?;

    let fields = form
        .by_tag("input")
        .into_iter()
        .filter(|input| is_submittable(input))
        .filter_map(|input| {
            let name = input.attr("name")?;
            Some((name.to_string(), input.attr("value").unwrap_or_default().to_string()))
        })
        .collect();

    Some(LoginForm {
        action: form.attr("action").unwrap_or_default().to_string(),
        fields,
    })
}

fn is_submittable(input: &Element) -> bool {
    match input
        .attr("type")
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("submit" | "button" | "image" | "reset" | "file") => false,
        Some("checkbox" | "radio") => input.has_attr("checked"),
        _ => true,
    }
}

/// Session ids of every booked class on the client schedule page.
///
/// Each booked class offers an `a.item__cancel` link whose last path segment
/// is the session id; classes without one are not booked.
#[must_use]
pub fn booked_ids_from_page(doc: &HtmlDocument) -> BTreeSet<String> {
    doc.root()
        .find_all(|el| el.tag() == "a" && el.has_class("item__cancel"))
        .into_iter()
        .filter_map(|link| link.attr("href"))
        .filter_map(last_path_segment)
        .collect()
}

fn last_path_segment(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(String::from)
}

/// `href` of the cart's "Next"/"Proceed" link, matched case-insensitively.
#[must_use]
pub fn find_checkout_action(doc: &HtmlDocument) -> Option<String> {
    doc.root()
        .find_first(|el| {
            el.tag() == "a"
                && el.attr("href").is_some_and(|href| !href.is_empty())
                && {
                    let label = el.text_content().to_ascii_lowercase();
                    CHECKOUT_LABELS.iter().any(|wanted| label.contains(wanted))
                }
        })
        .and_then(|link| link.attr("href"))
        .map(String::from)
}
