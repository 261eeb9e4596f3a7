// views/mod.rs - server-rendered pages
//
// Pages are small enough that plain string building is all they need.
// Every value that came from a user or the database goes through `escape`.

use axum::{http::StatusCode, response::Html};
use std::fmt::Write;

use crate::database::models::Product;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

fn format_price(product: &Product) -> String {
    format!("{:.2} {}", product.price, escape(&product.currency))
}

fn photo_tag(product: &Product) -> String {
    match &product.photo_path {
        Some(path) => format!(
            "<img src=\"/{}\" alt=\"{}\" width=\"160\">",
            escape(path),
            escape(&product.product_name)
        ),
        None => String::new(),
    }
}

fn message_block(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("<p class=\"error\" role=\"alert\">{}</p>\n", escape(message)),
        None => String::new(),
    }
}

/// GET / - public catalog
pub fn product_listing(products: &[Product]) -> Html<String> {
    let mut body = String::from("<h1>Products</h1>\n");

    if products.is_empty() {
        body.push_str("<p>No products yet.</p>\n");
    }

    for product in products {
        let _ = write!(
            body,
            "<article class=\"product\" id=\"product-{id}\">\n<h2>{name}</h2>\n{photo}\n<p class=\"price\">{price}</p>\n<p class=\"category\">{category}</p>\n<p class=\"description\">{description}</p>\n</article>\n",
            id = product.id,
            name = escape(&product.product_name),
            photo = photo_tag(product),
            price = format_price(product),
            category = escape(&product.category),
            description = escape(product.description.as_deref().unwrap_or_default()),
        );
    }

    body.push_str("<p><a href=\"/login\">Admin</a></p>");
    layout("Products", &body)
}

/// GET /login and failed POST /login
pub fn login_page(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Admin login</h1>\n{}<form method=\"post\" action=\"/login\">\n<label>Username <input type=\"text\" name=\"username\" autocomplete=\"username\"></label>\n<label>Password <input type=\"password\" name=\"password\" autocomplete=\"current-password\"></label>\n<button type=\"submit\">Log in</button>\n</form>",
        message_block(error)
    );
    layout("Admin login", &body)
}

/// GET /admin, and re-rendered with a message when an admin action fails
pub fn admin_page(products: &[Product], message: Option<&str>) -> Html<String> {
    let mut body = String::from("<h1>Admin panel</h1>\n<p><a href=\"/logout\">Log out</a></p>\n");
    body.push_str(&message_block(message));

    body.push_str("<form method=\"post\" action=\"/change_prices\">\n<table>\n<tr><th>ID</th><th>Name</th><th>Category</th><th>Price</th><th>New price</th></tr>\n");
    for product in products {
        let _ = writeln!(
            body,
            "<tr><td>{id}</td><td>{name}</td><td>{category}</td><td>{price}</td><td><input type=\"text\" name=\"price_{id}\" inputmode=\"decimal\"></td></tr>",
            id = product.id,
            name = escape(&product.product_name),
            category = escape(&product.category),
            price = format_price(product),
        );
    }
    body.push_str("</table>\n<button type=\"submit\">Save prices</button>\n</form>\n");

    for product in products {
        let _ = writeln!(
            body,
            "<form method=\"post\" action=\"/delete_product/{id}\"><button type=\"submit\">Delete {name}</button></form>",
            id = product.id,
            name = escape(&product.product_name),
        );
    }

    body.push_str(
        "<h2>Add product</h2>\n<form method=\"post\" action=\"/add_product\" enctype=\"multipart/form-data\">\n\
<label>Name <input type=\"text\" name=\"product_name\" required></label>\n\
<label>Price <input type=\"text\" name=\"price\" inputmode=\"decimal\" required></label>\n\
<label>Currency <input type=\"text\" name=\"currency\" maxlength=\"3\" placeholder=\"KGS\"></label>\n\
<label>Category <input type=\"text\" name=\"category\" required></label>\n\
<label>Description <textarea name=\"description\"></textarea></label>\n\
<label>Photo <input type=\"file\" name=\"photo\" accept=\".png,.jpg,.jpeg,.gif\"></label>\n\
<button type=\"submit\">Add product</button>\n</form>",
    );

    layout("Admin panel", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{}</h1>\n{}<p><a href=\"/admin\">Back to the admin panel</a></p>",
        escape(title),
        message_block(Some(message))
    );
    layout(title, &body)
}
