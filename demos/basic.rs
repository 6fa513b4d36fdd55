use std::path::Path;

use weekplan::Planner;
use weekplan::holiday::HolidayIndex;
use weekplan::local_store::LocalStore;
use weekplan::utils::PromptConfirm;
use weekplan::views::WeekView;
use weekplan::week::WeekKeyResolver;

const STORE_FOLDER: &str = "example_store";


#[tokio::main]
async fn main() {
    env_logger::init();

    let store_path = Path::new(STORE_FOLDER);
    let store = match LocalStore::from_folder(&store_path) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("Invalid store folder: {}. Using an empty store", err);
            LocalStore::new(&store_path)
        }
    };
    let mut planner = Planner::new(store);
    if let Err(err) = planner.load().await {
        log::error!("Unable to load the planner: {}", err);
    }

    let resolver = WeekKeyResolver::today();
    let holidays = HolidayIndex::berlin_2025().unwrap();
    let view = WeekView::default();
    println!("---- KW {} (today is {}) -----", view.week(&resolver), resolver.reference_date());
    for header in view.headers(&resolver, &holidays) {
        let holiday = header.holiday.map(|name| format!(" ({})", name)).unwrap_or_default();
        println!("{} {}{}", header.day, header.label, holiday);
    }
    weekplan::utils::print_week(&planner.blocks());

    println!("---- to-dos -----");
    weekplan::utils::print_todos(planner.todos());

    if planner.registry().is_empty() {
        return;
    }
    let mut confirm = PromptConfirm::terminal();
    match planner.delete_subject(0, &mut confirm).await {
        Ok(true) => println!("---- after deletion -----"),
        Ok(false) => return,
        Err(err) => log::error!("Unable to delete the subject: {}", err),
    }
    weekplan::utils::print_week(&planner.blocks());
    weekplan::utils::print_todos(planner.todos());
}
