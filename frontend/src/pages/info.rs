//! 静态信息页：首页与联系方式

use crate::components::layout::PageContainer;
use crate::web::route::RouteKey;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();
    let reviews_path = router.with_table(|t| t.path(RouteKey::Reviews));

    view! {
        <div class="hero min-h-[50vh] bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-2xl space-y-4">
                    <h1 class="text-5xl font-bold">"Добро пожаловать в гимназию"</h1>
                    <p class="text-lg text-base-content/70">
                        "Мы помогаем ученикам раскрыть способности, участвовать в олимпиадах "
                        "и готовиться к поступлению в ведущие университеты."
                    </p>
                    <Link to=reviews_path class="btn btn-primary">"Отзывы учеников"</Link>
                </div>
            </div>
        </div>
        <section class="max-w-5xl mx-auto p-4 md:p-8 grid gap-4 md:grid-cols-3">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"Обучение"</h2>
                    <p>"Углублённые программы по гуманитарным и естественным наукам."</p>
                </div>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"Олимпиады"</h2>
                    <p>"Подготовка к олимпиадам и научным конференциям всех уровней."</p>
                </div>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"Внеурочная жизнь"</h2>
                    <p>"Кружки, секции, праздники и школьные традиции."</p>
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn ContactsPage() -> impl IntoView {
    view! {
        <PageContainer title="Контакты".to_string()>
            <ul class="space-y-2">
                <li>"Адрес: ул. Школьная, 1"</li>
                <li>"Телефон: +7 (000) 000-00-00"</li>
                <li>"Email: info@gymnasium.ru"</li>
            </ul>
        </PageContainer>
    }
}
