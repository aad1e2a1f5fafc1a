mod commit;
mod summary;
