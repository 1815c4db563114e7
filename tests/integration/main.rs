mod helpers;
mod test_pages;
