//! Inline page controller shipped to browsers.
//!
//! Mirrors `client_core::PageController`: conversation state lives in one
//! closure, is reset on every submission, and server text is inserted with
//! `textContent`. Runtime settings are read from the `page-config` JSON block.

pub(crate) const SCRIPT: &str = r#"
    (function () {
        const config = JSON.parse(document.getElementById('page-config').textContent);
        const messages = config.messages;

        const queryInput = document.getElementById('query');
        const submitBtn = document.getElementById('submit-btn');
        const nextBtn = document.getElementById('next-btn');
        const loader = document.getElementById('loader');
        const textResponse = document.getElementById('text-response');
        const talkSection = document.getElementById('talk-section');
        const talkResponse = document.getElementById('talk-response');
        const logSection = document.getElementById('log-section');
        const logToggle = document.getElementById('log-toggle');
        const logsContainer = document.getElementById('logs');

        let cursor = null;

        function setBusy(busy) {
            loader.style.display = busy ? 'block' : 'none';
        }

        async function postJson(path, body) {
            const response = await fetch(config.api_base + path, {
                method: 'POST',
                headers: {
                    'Content-Type': 'application/json'
                },
                body: JSON.stringify(body)
            });
            return response.json();
        }

        function renderLogs(logs) {
            logsContainer.replaceChildren();
            if (!Array.isArray(logs)) {
                logSection.style.display = 'none';
                return;
            }
            logs.forEach((log) => {
                const item = document.createElement('div');
                const agent = document.createElement('h3');
                agent.textContent = log.agent;
                const text = document.createElement('p');
                text.textContent = log.response;
                item.append(agent, text);
                logsContainer.appendChild(item);
            });
            logSection.style.display = 'block';
        }

        submitBtn.addEventListener('click', async () => {
            const query = queryInput.value.trim();
            if (!query) {
                alert(messages.empty_query);
                return;
            }

            cursor = null;
            textResponse.style.display = 'none';
            talkSection.style.display = 'none';
            setBusy(true);
            submitBtn.disabled = true;

            try {
                const data = await postJson(config.query_path, { query });

                if (data.status === 'success') {
                    textResponse.textContent = data.text_response ?? '';
                    textResponse.style.display = 'block';
                    renderLogs(data.verification_logs);

                    if (data.talk_initial) {
                        const talk = data.talk_initial;
                        cursor = {
                            thread_id: talk.thread_id,
                            agent_id: talk.agent_id,
                            part_number: 2,
                            completed: Boolean(talk.completed)
                        };
                        talkResponse.textContent = talk.initial_response;
                        talkSection.style.display = 'block';
                        nextBtn.disabled = cursor.completed;
                    }
                } else {
                    alert(data.message || messages.generic_failure);
                }
            } catch (error) {
                console.error('Error:', error);
                alert(messages.transport_failure);
            } finally {
                setBusy(false);
                submitBtn.disabled = false;
            }
        });

        nextBtn.addEventListener('click', async () => {
            const active = cursor;
            if (!active || active.completed) return;

            nextBtn.disabled = true;
            setBusy(true);

            try {
                const data = await postJson(config.continue_path, {
                    thread_id: active.thread_id,
                    agent_id: active.agent_id,
                    part_number: active.part_number
                });

                // A newer query replaced this conversation while in flight.
                if (cursor !== active) return;

                if (data.status === 'success') {
                    if (!data.response) {
                        throw new Error('continue_talk response without payload');
                    }

                    talkResponse.textContent = data.response.response;
                    if (data.response.completed) {
                        active.completed = true;
                        nextBtn.disabled = true;
                    } else {
                        active.part_number += 1;
                        nextBtn.disabled = false;
                    }
                } else {
                    alert(data.message || messages.generic_failure);
                }
            } catch (error) {
                console.error('Error:', error);
                if (cursor === active) {
                    alert(messages.transport_failure);
                }
            } finally {
                if (cursor === active) {
                    setBusy(false);
                }
            }
        });

        logToggle.addEventListener('click', () => {
            logsContainer.style.display = logsContainer.style.display === 'none' ? 'block' : 'none';
        });
    })();
"#;
