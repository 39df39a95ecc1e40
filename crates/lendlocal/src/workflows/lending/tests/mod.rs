mod common;

mod risk;
mod routing;
