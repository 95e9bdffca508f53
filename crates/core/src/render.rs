//! Static storefront markup.
//!
//! Renders a [`StorefrontSnapshot`] into plain HTML with an embedded Tera
//! template. Only structure is produced; styling is left to the host page.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use tera::{Context, Tera};

use crate::errors::ApplicationError;
use crate::pricing::format_money;
use crate::session::StorefrontSnapshot;

pub const STOREFRONT_TEMPLATE: &str = "storefront.html";

const STOREFRONT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Dynamic Store Demo</title></head>
<body>
<header>
  <h1>Dynamic Store Demo</h1>
  <p>Filter Products and Manage Your Cart</p>
</header>
<nav>
  <h3>Filter by Category:</h3>
  <ul class="categories">
  {%- for category in categories %}
    <li{% if category == selected_category %} class="selected"{% endif %}>{{ category }}</li>
  {%- endfor %}
  </ul>
</nav>
<main>
  <h2>Product Catalog</h2>
  {%- for product in products %}
  <article class="product" data-product-id="{{ product.id }}">
    <h4>{{ product.name }}</h4>
    <p>Category: {{ product.category }}</p>
    <p class="price">{{ symbol }}{{ product.price | money }}</p>
  </article>
  {%- endfor %}
</main>
<aside class="cart">
  <h2>Shopping Cart</h2>
  {%- if cart | length == 0 %}
  <p class="empty">Your cart is empty. Start adding items!</p>
  {%- else %}
  <ul>
  {%- for line in cart %}
    <li data-product-id="{{ line.product_id }}">{{ line.name }} x{{ line.quantity }} <span>{{ symbol }}{{ line.line_total | money }}</span></li>
  {%- endfor %}
  </ul>
  <h3 class="total"><span>Total:</span> <span>{{ symbol }}{{ total | money }}</span></h3>
  {%- endif %}
</aside>
</body>
</html>
"#;

/// Register the `money` filter used by storefront templates.
///
/// `amount | money` formats a decimal (string or number) to 2 places.
pub fn register_template_filters(tera: &mut Tera) {
    tera.register_filter("money", tera_money_filter);
}

fn tera_money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let amount = match value {
        tera::Value::String(raw) => Decimal::from_str(raw)
            .map_err(|error| tera::Error::msg(format!("money filter: invalid amount `{raw}`: {error}")))?,
        tera::Value::Number(number) => Decimal::from_str(&number.to_string())
            .map_err(|error| tera::Error::msg(format!("money filter: invalid amount: {error}")))?,
        tera::Value::Null => Decimal::ZERO,
        _ => return Err(tera::Error::msg("money filter expects a number or decimal string")),
    };
    Ok(tera::Value::String(format_money(amount)))
}

fn currency_symbol(currency: &str) -> &str {
    match currency {
        "USD" | "CAD" | "AUD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        other => other,
    }
}

pub struct StorefrontRenderer {
    tera: Tera,
}

impl StorefrontRenderer {
    pub fn new() -> Result<Self, ApplicationError> {
        let mut tera = Tera::default();
        register_template_filters(&mut tera);
        tera.add_raw_template(STOREFRONT_TEMPLATE, STOREFRONT_HTML)
            .map_err(|error| ApplicationError::Render(error.to_string()))?;
        Ok(Self { tera })
    }

    pub fn render(&self, snapshot: &StorefrontSnapshot) -> Result<String, ApplicationError> {
        let mut context = Context::from_serialize(snapshot)
            .map_err(|error| ApplicationError::Render(error.to_string()))?;
        context.insert("symbol", currency_symbol(&snapshot.currency));

        self.tera
            .render(STOREFRONT_TEMPLATE, &context)
            .map_err(|error| ApplicationError::Render(error.to_string()))
    }
}
