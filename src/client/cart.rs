use crate::models::menu::MenuItem;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

/// Client-side cart: plain list arithmetic, nothing is reserved or priced
/// server-side until checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add an item; adding one already in the cart bumps its quantity.
    pub fn add(&mut self, item: MenuItem, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine { item, quantity });
        }
    }

    /// Remove an item entirely. Returns false if it wasn't in the cart.
    pub fn remove(&mut self, item_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item.id != item_id);
        self.lines.len() != before
    }

    /// Set an item's quantity; zero removes it. Returns false if the item
    /// wasn't in the cart.
    pub fn set_quantity(&mut self, item_id: i64, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(item_id);
        }
        match self.lines.iter_mut().find(|l| l.item.id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.lines
            .iter()
            .map(|l| l.item.price * i64::from(l.quantity))
            .sum()
    }

    /// The item list in the wire shape the payment endpoint expects.
    pub fn order_items(&self) -> serde_json::Value {
        json!(self
            .lines
            .iter()
            .map(|l| {
                json!({
                    "id": l.item.id,
                    "name": l.item.name,
                    "price": l.item.price,
                    "quantity": l.quantity,
                })
            })
            .collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, price: i64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            image: String::new(),
            category: "Main Course".to_string(),
            is_veg: true,
        }
    }

    #[test]
    fn adding_same_item_merges_quantities() {
        let mut cart = Cart::default();
        cart.add(item(1, "Paneer Tikka", 249), 1);
        cart.add(item(1, "Paneer Tikka", 249), 2);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total(), 747);
    }

    #[test]
    fn total_sums_across_lines() {
        let mut cart = Cart::default();
        cart.add(item(1, "Paneer Tikka", 249), 2);
        cart.add(item(2, "Butter Chicken", 349), 1);

        assert_eq!(cart.total(), 847);
    }

    #[test]
    fn remove_and_zero_quantity_drop_the_line() {
        let mut cart = Cart::default();
        cart.add(item(1, "Paneer Tikka", 249), 1);
        cart.add(item(2, "Butter Chicken", 349), 1);

        assert!(cart.remove(1));
        assert!(!cart.remove(1));
        assert!(cart.set_quantity(2, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_on_missing_item_is_rejected() {
        let mut cart = Cart::default();
        assert!(!cart.set_quantity(99, 2));
    }

    #[test]
    fn order_items_carry_the_wire_shape() {
        let mut cart = Cart::default();
        cart.add(item(3, "Veg Biryani", 299), 2);

        let items = cart.order_items();
        assert_eq!(items[0]["name"], "Veg Biryani");
        assert_eq!(items[0]["quantity"], 2);
        assert_eq!(items[0]["price"], 299);
    }
}
