//! 計測指標カタログ表示

use leptos::prelude::*;
use cellscope_common::{MetricGroup, MetricsCatalog};

#[component]
pub fn MetricsPanel(catalog: ReadSignal<Option<MetricsCatalog>>) -> impl IntoView {
    view! {
        <Show
            when=move || catalog.with(|c| c.as_ref().is_some_and(|c| !c.is_empty()))
            fallback=|| view! { <p class="text-muted">"指標カタログはありません"</p> }
        >
            <div class="metrics-panel">
                {move || {
                    catalog.get().map(|c| {
                        [MetricGroup::Morphological, MetricGroup::Migratory]
                            .into_iter()
                            .map(|group| {
                                let rows = c
                                    .group(group)
                                    .iter()
                                    .map(|m| view! {
                                        <li>
                                            <strong>{m.display_name()}</strong>
                                            " " {m.description.clone()}
                                        </li>
                                    })
                                    .collect_view();
                                view! {
                                    <section>
                                        <h4>{group.label()}</h4>
                                        <ul>{rows}</ul>
                                    </section>
                                }
                            })
                            .collect_view()
                    })
                }}
            </div>
        </Show>
    }
}
