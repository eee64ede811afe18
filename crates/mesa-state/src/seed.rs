//! # Seed Data
//!
//! The fixed data set every Mesa POS session starts from: four tables, a
//! ten-item menu, five staff accounts and two bookings.
//!
//! Ids are short literals ("1", "2", ...) so demos and tests can refer to
//! them directly. Entities created at runtime get UUIDs.

use chrono::{Duration, Utc};
use mesa_core::{
    Modifier, ModifierKind, Product, Reservation, ReservationStatus, Table, TableLayout,
    TableStatus, User, UserRole,
};

use crate::state::{PosState, ProductCatalog, ReservationBook, TableRegistry, UserDirectory};

impl PosState {
    /// A POS loaded with the seed data set.
    pub fn seeded() -> Self {
        PosState::from_parts(
            TableRegistry::new(tables()),
            ProductCatalog::new(products()),
            ReservationBook::new(reservations()),
            UserDirectory::new(users()),
        )
    }
}

// =============================================================================
// Tables
// =============================================================================

pub fn tables() -> Vec<Table> {
    vec![
        table("1", 1, 4, "Salón", TableStatus::Available, (50, 50, 80, 80)),
        table("2", 2, 2, "Salón", TableStatus::Occupied, (150, 50, 60, 60)),
        table("3", 3, 6, "Terraza", TableStatus::Available, (250, 50, 100, 80)),
        table("4", 4, 4, "Barra", TableStatus::Reserved, (50, 150, 80, 80)),
    ]
}

fn table(
    id: &str,
    number: u32,
    capacity: u32,
    zone: &str,
    status: TableStatus,
    (x, y, width, height): (i32, i32, i32, i32),
) -> Table {
    Table {
        id: id.to_string(),
        number,
        capacity,
        zone: zone.to_string(),
        status,
        layout: TableLayout {
            x,
            y,
            width,
            height,
        },
        current_order: None,
    }
}

// =============================================================================
// Menu
// =============================================================================

pub fn products() -> Vec<Product> {
    const MAINS: &str = "Platos principales";
    const DRINKS: &str = "Bebidas";

    vec![
        product(
            "1",
            "Hamburguesa Clásica",
            "Carne, lechuga, tomate, cebolla",
            1299,
            MAINS,
            vec![
                addition("1", "Extra queso", 150),
                substitution("2", "Sin cebolla"),
            ],
        ),
        product(
            "2",
            "Pizza Margherita",
            "Salsa de tomate, mozzarella, albahaca",
            1599,
            MAINS,
            vec![addition("3", "Extra pepperoni", 200)],
        ),
        product("3", "Café Americano", "Café negro tradicional", 350, DRINKS, vec![]),
        product(
            "4",
            "Ensalada César",
            "Lechuga, pollo, crutones, parmesano",
            999,
            "Ensaladas",
            vec![addition("4", "Extra pollo", 300)],
        ),
        product(
            "5",
            "Tacos de Carnitas",
            "Tortillas de maíz, carnitas, cebolla, cilantro",
            899,
            MAINS,
            vec![
                addition("5", "Extra salsa", 50),
                substitution("6", "Sin cebolla"),
            ],
        ),
        product(
            "6",
            "Salmón a la Parrilla",
            "Salmón fresco con vegetales asados",
            2299,
            MAINS,
            vec![addition("7", "Salsa de limón", 100)],
        ),
        product(
            "7",
            "Pasta Carbonara",
            "Pasta con huevo, panceta y parmesano",
            1499,
            MAINS,
            vec![addition("8", "Extra panceta", 250)],
        ),
        product(
            "8",
            "Smoothie de Frutas",
            "Mezcla de frutas tropicales",
            599,
            DRINKS,
            vec![addition("9", "Extra proteína", 150)],
        ),
        product("9", "Cheesecake", "Tarta de queso con frutos rojos", 699, "Postres", vec![]),
        product("10", "Cerveza Artesanal", "Cerveza local de barril", 450, DRINKS, vec![]),
    ]
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    category: &str,
    modifiers: Vec<Modifier>,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_cents,
        category: category.to_string(),
        image: None,
        modifiers,
        is_active: true,
    }
}

fn addition(id: &str, name: &str, price_cents: i64) -> Modifier {
    Modifier {
        id: id.to_string(),
        name: name.to_string(),
        price_cents,
        kind: ModifierKind::Addition,
    }
}

fn substitution(id: &str, name: &str) -> Modifier {
    Modifier {
        id: id.to_string(),
        name: name.to_string(),
        price_cents: 0,
        kind: ModifierKind::Substitution,
    }
}

// =============================================================================
// Staff
// =============================================================================

pub fn users() -> Vec<User> {
    let now = Utc::now();
    [
        ("1", "Admin User", "admin", UserRole::Admin),
        ("2", "Juan Mesero", "mesero", UserRole::Waiter),
        ("3", "Ana Cajera", "cajero", UserRole::Cashier),
        ("4", "Chef Carlos", "chef", UserRole::Kitchen),
        ("5", "Host María", "host", UserRole::Host),
    ]
    .into_iter()
    .map(|(id, name, username, role)| User {
        id: id.to_string(),
        name: name.to_string(),
        username: username.to_string(),
        role,
        is_active: true,
        created_at: now,
    })
    .collect()
}

// =============================================================================
// Reservations
// =============================================================================

/// One booking tonight, one tomorrow.
pub fn reservations() -> Vec<Reservation> {
    let now = Utc::now();
    let today = now.date_naive();

    vec![
        Reservation {
            id: "1".to_string(),
            customer_name: "María González".to_string(),
            customer_phone: "+58 414-123-4567".to_string(),
            customer_email: Some("maria@email.com".to_string()),
            table_id: "1".to_string(),
            date: today,
            time: "19:30".to_string(),
            party_size: 4,
            status: ReservationStatus::Confirmed,
            notes: Some("Cumpleaños, necesita decoración especial".to_string()),
            created_at: now,
        },
        Reservation {
            id: "2".to_string(),
            customer_name: "Carlos Rodríguez".to_string(),
            customer_phone: "+58 424-987-6543".to_string(),
            customer_email: None,
            table_id: "3".to_string(),
            date: today + Duration::days(1),
            time: "20:00".to_string(),
            party_size: 2,
            status: ReservationStatus::Confirmed,
            notes: Some("Cena romántica".to_string()),
            created_at: now,
        },
    ]
}
