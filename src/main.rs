use capture_load::error::AppResult;

fn main() -> AppResult<()> {
    capture_load::entry::run()
}
