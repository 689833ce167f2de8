pub mod error;

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod models {
    pub mod conversion;
    pub mod file;
}

pub mod service {
    pub mod config_service;
    pub mod file;
    pub mod latex;
    pub mod path;
    pub mod pdf;
    pub mod process;
    pub mod requirements;
    pub mod runner;
    pub mod word;

    pub mod traits {
        pub mod i_service;
    }
}

pub mod facade {
    pub mod conversion_facade;

    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod utils {
    pub mod utils;
}
