pub mod domain;
pub mod ports;
pub mod services;
pub mod subscription_use_cases;
