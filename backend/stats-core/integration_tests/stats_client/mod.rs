mod commits;
mod contributor_commits;
mod failures;
mod languages;
mod repo;
