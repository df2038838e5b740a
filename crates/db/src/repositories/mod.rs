mod media_record_repo;

pub use media_record_repo::MediaRecordRepo;
