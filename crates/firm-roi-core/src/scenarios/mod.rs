pub mod sensitivity;
pub mod what_if;
