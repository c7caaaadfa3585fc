use wasm_bindgen::prelude::*;

mod convert;
mod grid;
mod utils;

pub use grid::*;

#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
}
