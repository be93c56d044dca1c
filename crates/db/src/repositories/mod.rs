mod activity_repo;

pub use activity_repo::ActivityRepo;
