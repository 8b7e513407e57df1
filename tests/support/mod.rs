#![allow(dead_code)]

pub mod assertions;
pub mod league;
pub mod model;
