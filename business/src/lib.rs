pub mod application {
    pub mod product {
        pub mod bounded_repository;
        pub mod config;
        pub mod get_all;
        pub mod get_by_id;
        pub mod image_gateway;
        pub mod remove;
        pub mod save;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod product {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod storage;
        pub mod value_objects;
        pub mod use_cases {
            pub mod get_all;
            pub mod get_by_id;
            pub mod remove;
            pub mod save;
        }
    }
}
