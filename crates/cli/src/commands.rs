//! CLI output for the cart.

use shopcart::store::CartStore;

/// Print the current cart to stdout.
#[allow(clippy::print_stdout)]
pub fn show(store: &CartStore) {
    let cart = store.snapshot();

    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for line in cart.lines() {
        println!(
            "{:>4}  {:<32} {:>4} x {:>10} = {:>12}",
            line.product_id(),
            line.product.title,
            line.amount,
            line.product.price,
            line.line_total()
        );
    }

    println!(
        "{} items across {} products, subtotal {}",
        cart.total_items(),
        cart.len(),
        cart.subtotal()
    );
}
