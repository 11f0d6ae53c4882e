use wasm_bindgen::prelude::*;
use orrery::*;

mod bodies;
mod camera_controller;
mod config;
#[cfg(feature = "vectors")]
mod decor;
mod game;
mod picking;
mod scene_builder;
mod state;
mod updater;
use game::SolarSystem;

#[cfg(feature = "vectors")]
orrery_web::export_game!(SolarSystem, "solar-system", vectors);
#[cfg(not(feature = "vectors"))]
orrery_web::export_game!(SolarSystem, "solar-system");
